//! `timehouse settings`

use clap::Subcommand;

use timehouse::{
    session::Session,
    settings::{Locale, Theme},
};

#[derive(Debug, Subcommand)]
pub(crate) enum SettingsCommand {
    /// Show current preferences
    Show,

    /// Set the display language (en, ar)
    Locale {
        /// Locale code
        locale: Locale,
    },

    /// Set the colour scheme (light, dark)
    Theme {
        /// Theme name
        theme: Theme,
    },

    /// Switch between English and Arabic
    ToggleLocale,
}

pub(super) fn run(command: SettingsCommand, session: &mut Session) -> Result<(), String> {
    let settings = session.settings_mut();

    match command {
        SettingsCommand::Show => {}
        SettingsCommand::Locale { locale } => settings.set_locale(locale),
        SettingsCommand::Theme { theme } => settings.set_theme(theme),
        SettingsCommand::ToggleLocale => settings.toggle_locale(),
    }

    #[expect(clippy::print_stdout, reason = "CLI output")]
    {
        println!("locale: {}", settings.locale());
        println!("theme:  {}", settings.theme());
    }

    Ok(())
}
