use thiserror::Error;

/// Rejected minigame input. The messages are shown to the member as they are.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("❌ Neplatný formát času! Použij např. `30s`, `2m`, `1h`, `1d`")]
    InvalidDuration,

    #[error("❌ Minimální čas je {0}!")]
    DurationTooShort(String),

    #[error("❌ Maximální čas je {0}!")]
    DurationTooLong(String),

    #[error("❌ Musíš zadat alespoň 2 možnosti!")]
    TooFewOptions,

    #[error("❌ Maximum je 10 možností!")]
    TooManyOptions,

    #[error("❌ Použij formát: `!poll 5m Otázka? | Možnost1, Možnost2, Možnost3`")]
    MissingPollSeparator,

    #[error("❌ Tato anketa již skončila!")]
    PollClosed,

    #[error("❌ Pouze autor nebo admin může zrušit odpočet!")]
    NotCountdownOwner,

    #[error("❌ Tento kvíz patří někomu jinému!")]
    NotQuizOwner,

    #[error("⌛ Čas na odpověď vypršel!")]
    QuizExpired,
}
