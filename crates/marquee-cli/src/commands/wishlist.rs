//! Wishlist commands.

use marquee_models::MovieId;
use marquee_ui::features::catalog::state::{
    CatalogState, restore_wishlist, select_wished_movies, toggle_wishlist,
};

use crate::client::{AppContext, CliResult};
use crate::commands::catalog::reload_state;
use crate::output::render_movies;

pub(crate) fn handle_wishlist_toggle(ctx: &AppContext, id: MovieId) -> CliResult<()> {
    let mut state = CatalogState {
        wishlist: restore_wishlist(&ctx.store),
        ..CatalogState::default()
    };
    let wished = toggle_wishlist(&mut state, &ctx.store, id)?;
    if wished {
        println!("Added movie {id} to the wishlist.");
    } else {
        println!("Removed movie {id} from the wishlist.");
    }
    Ok(())
}

pub(crate) async fn handle_wishlist_list(ctx: &AppContext) -> CliResult<()> {
    let state = reload_state(ctx).await?;
    let wished = select_wished_movies(&state);
    render_movies(&wished, ctx.output)?;
    let unlisted: Vec<String> = state
        .wishlist
        .iter()
        .filter(|id| !wished.iter().any(|movie| movie.id == **id))
        .map(ToString::to_string)
        .collect();
    if !unlisted.is_empty() {
        tracing::info!(ids = %unlisted.join(","), "wishlisted movies outside the loaded listings");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use marquee_ui::core::storage::{KeyValueStore, WISHLIST_KEY};
    use tempfile::tempdir;

    #[test]
    fn toggle_round_trips_through_the_state_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let ctx = context(None, None, &dir)?;
        for id in [5, 1, 5, 9] {
            handle_wishlist_toggle(&ctx, id).map_err(|err| anyhow::anyhow!(err.display_message()))?;
        }
        assert_eq!(ctx.store.get(WISHLIST_KEY).as_deref(), Some("[1,9]"));

        let reopened = context(None, None, &dir)?;
        assert_eq!(
            restore_wishlist(&reopened.store).into_iter().collect::<Vec<_>>(),
            vec![1, 9]
        );
        Ok(())
    }

    #[test]
    fn corrupt_wishlist_is_replaced_on_toggle() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let ctx = context(None, None, &dir)?;
        ctx.store.set(WISHLIST_KEY, "{broken")?;
        handle_wishlist_toggle(&ctx, 3).map_err(|err| anyhow::anyhow!(err.display_message()))?;
        assert_eq!(ctx.store.get(WISHLIST_KEY).as_deref(), Some("[3]"));
        Ok(())
    }
}
