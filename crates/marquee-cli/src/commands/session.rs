//! Sign-in, sign-out, status, and route guard checks.

use marquee_ui::core::auth::{AuthError, AuthState, SignIn};
use marquee_ui::core::guard::{GuardDecision, evaluate};
use marquee_ui::core::route::Route;

use crate::cli::{BrowseArgs, SignInArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{RouteAccess, SessionReport, mask_secret, render_session};

pub(crate) async fn handle_sign_in(ctx: &AppContext, args: SignInArgs) -> CliResult<()> {
    let mut auth = AuthState::initialize(&ctx.store);
    let sign_in = SignIn {
        identity_id: args.user,
        api_key: args.key,
        external_token: args.token,
    };
    auth.sign_in_with_key(&ctx.catalog, &ctx.store, sign_in)
        .await
        .map_err(auth_error)?;
    let identity = auth.session().identity_id.as_deref().unwrap_or_default();
    tracing::info!(identity, "signed in");
    println!("Signed in as {identity}.");
    Ok(())
}

pub(crate) fn handle_sign_out(ctx: &AppContext) -> CliResult<()> {
    let mut auth = AuthState::initialize(&ctx.store);
    let next = auth.logout(&ctx.store);
    println!("Signed out. Next view: {}.", next.name());
    Ok(())
}

pub(crate) fn handle_status(ctx: &AppContext) -> CliResult<()> {
    let auth = AuthState::initialize(&ctx.store);
    let session = auth.session();
    let report = SessionReport {
        authenticated: session.is_authenticated,
        identity: session.identity_id.clone(),
        api_key: session.cached_api_key.as_deref().map(mask_secret),
        external_token: session.external_token.is_some(),
        routes: Route::all()
            .into_iter()
            .map(|route| RouteAccess {
                route: route.name(),
                allowed: evaluate(route, session) == GuardDecision::Allow,
            })
            .collect(),
    };
    render_session(&report, ctx.output)
}

pub(crate) fn handle_browse(ctx: &AppContext, args: &BrowseArgs) -> CliResult<()> {
    let route = Route::from_name(&args.route).ok_or_else(|| {
        CliError::validation(format!(
            "unknown route '{}' (expected home, popular, search, signin, or wishlist)",
            args.route
        ))
    })?;
    let auth = AuthState::initialize(&ctx.store);
    match evaluate(route, auth.session()) {
        GuardDecision::Allow => {
            println!("{} is reachable.", route.name());
            Ok(())
        }
        GuardDecision::Redirect(to) => Err(CliError::validation(format!(
            "{} requires sign-in; redirected to {}. Run `marquee sign-in --user <id> --key <key>`.",
            route.name(),
            to.name()
        ))),
    }
}

fn auth_error(err: AuthError) -> CliError {
    match err {
        AuthError::InvalidCredential => CliError::validation("the catalog rejected the API key"),
        AuthError::MissingIdentity => CliError::validation("--user must not be blank"),
        AuthError::Storage { source } => source.into(),
    }
}
