//! `/help` and `!pomoc`.

use serenity::all::{CommandInteraction, Context, CreateCommand, CreateEmbed};

use crate::server::{bot::command::respond_embed, error::AppError};

pub const NAME: &str = "help";
pub const PREFIX_NAME: &str = "pomoc";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME).description("Přehled příkazů")
}

pub async fn run(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    respond_embed(ctx, command, embed(), vec![]).await
}

pub fn embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("📖 Nápověda")
        .field(
            "⏰ Odpočet",
            "`/odpocet cas:5m [duvod]`\n`!odpocet 5m Pizza` (také `!countdown`, `!timer`)",
            false,
        )
        .field(
            "📊 Ankety",
            "`/poll otazka moznosti:A, B [cas:5m]`\n`!poll 5m Otázka? | A, B, C` (také `!anketa`, `!hlasovani`)",
            false,
        )
        .field(
            "🧠 Kvíz",
            "`/quiz [obtiznost] [typ]` příklad, rovnice, hlavolam nebo vědomostní otázka\nBez nahraných vědomostních otázek dostaneš příklad.",
            false,
        )
        .field(
            "⭐ Level a XP",
            "`/level [uzivatel]`, `/daily`, `/leaderboard`, `/quests [hra]`\nXP získáš i hraním her, když je vidět tvoje aktivita.",
            false,
        )
        .color(0x3498db)
}
