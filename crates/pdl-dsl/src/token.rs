use logos::Logos;

/// The fixed leading text of each PDL line form, indentation included.
///
/// Only the first token of a line is lexed; the parser reads whatever follows
/// it. Heads are matched as prefixes, so `versionx` still opens the version
/// block and `    enumerate` still opens an enum. A line no head matches is
/// an illegal token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // -- Top level --
    #[regex("(experimental )?(deprecated )?domain ")]
    Domain,

    #[token("version")]
    Version,

    // -- Domain members --
    #[token("  depends on ")]
    DependsOn,

    #[token("  major ")]
    Major,

    #[token("  minor ")]
    Minor,

    #[regex("  (experimental )?(deprecated )?type ")]
    Type,

    #[regex("  (experimental )?(deprecated )?command ")]
    Command,

    #[regex("  (experimental )?(deprecated )?event ")]
    Event,

    // -- Item members --
    #[token("    parameters")]
    Parameters,

    #[token("    returns")]
    Returns,

    #[token("    properties")]
    Properties,

    #[token("    enum")]
    Enum,

    #[token("    redirect ")]
    Redirect,

    /// Parameters and enum literals.
    #[token("      ")]
    Member,
}

impl Token {
    /// True for heads that carry `experimental`/`deprecated` prefixes.
    pub fn takes_modifiers(&self) -> bool {
        matches!(
            self,
            Self::Domain | Self::Type | Self::Command | Self::Event
        )
    }
}
