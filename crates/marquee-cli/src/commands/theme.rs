//! Theme preference commands.

use marquee_ui::core::theme::{ThemeMode, ThemeState};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult};

pub(crate) fn handle_theme_toggle(ctx: &AppContext) -> CliResult<()> {
    let mut theme = ThemeState::load(&ctx.store);
    let mode = theme.toggle_dark_mode(&ctx.store);
    print_mode(mode, None, ctx.output)
}

pub(crate) fn handle_theme_show(ctx: &AppContext) -> CliResult<()> {
    print_mode(ThemeState::load(&ctx.store).mode, None, ctx.output)
}

pub(crate) fn handle_theme_sync(ctx: &AppContext, prefers_dark: bool) -> CliResult<()> {
    let mut theme = ThemeState::load(&ctx.store);
    let changed = theme.sync_with_system(prefers_dark, &ctx.store);
    print_mode(theme.mode, Some(changed), ctx.output)
}

fn print_mode(mode: ThemeMode, changed: Option<bool>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string(&json!({ "mode": mode.as_str(), "changed": changed }))
                .map_err(CliError::failure)?;
            println!("{text}");
        }
        OutputFormat::Table => match changed {
            Some(true) => println!("{} (changed)", mode.as_str()),
            Some(false) => println!("{} (unchanged)", mode.as_str()),
            None => println!("{}", mode.as_str()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use marquee_ui::core::storage::{DARK_MODE_KEY, KeyValueStore};
    use tempfile::tempdir;

    #[test]
    fn toggle_then_sync_persists_mode() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let ctx = context(None, None, &dir)?;
        assert!(handle_theme_toggle(&ctx).is_ok());
        assert_eq!(ctx.store.get(DARK_MODE_KEY).as_deref(), Some("true"));

        assert!(handle_theme_sync(&ctx, true).is_ok());
        assert_eq!(ctx.store.get(DARK_MODE_KEY).as_deref(), Some("true"));

        assert!(handle_theme_sync(&ctx, false).is_ok());
        assert_eq!(ctx.store.get(DARK_MODE_KEY).as_deref(), Some("false"));
        assert!(handle_theme_show(&ctx).is_ok());
        Ok(())
    }
}
