//! Handlers invoked by the UI. Each one mutates a state through the context;
//! the derivation reruns on the next `run_computed`.

use log::{debug, info};
use roster_states::StateCtx;

use crate::BusinessConfig;
use crate::users::{
    DerivedUsersCompute, LoadUsersCommand, LoadUsersCompute, TableStyle, UsersState, ViewControls,
};

/// Register every state, compute and command the users table needs.
pub fn register(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(config);
    ctx.add_state(UsersState::default());
    ctx.add_state(ViewControls::default());
    ctx.add_state(TableStyle::default());

    ctx.record_compute(LoadUsersCompute::default());
    ctx.record_compute(DerivedUsersCompute::default());

    ctx.record_command(LoadUsersCommand);
}

/// Queue the initial load unless it was already requested this session.
///
/// Safe to call every frame. Returns `true` when the load was queued.
pub fn request_initial_load(ctx: &mut StateCtx) -> bool {
    if ctx.state::<UsersState>().load_requested() {
        return false;
    }
    let claimed = ctx.state_mut::<UsersState>().claim_initial_load();
    if claimed {
        info!("Requesting initial users load");
        ctx.enqueue_command::<LoadUsersCommand>();
    }
    claimed
}

pub fn toggle_color_columns(ctx: &mut StateCtx) {
    ctx.update::<TableStyle>(TableStyle::toggle_color_columns);
}

pub fn toggle_sort_by_country(ctx: &mut StateCtx) {
    ctx.update::<ViewControls>(ViewControls::toggle_sort_by_country);
}

pub fn set_filter_country(ctx: &mut StateCtx, text: &str) {
    if ctx.state::<ViewControls>().filter_country() == Some(text) {
        return;
    }
    ctx.update::<ViewControls>(|controls| controls.set_filter_country(text));
}

pub fn delete_user(ctx: &mut StateCtx, id: &str) {
    if !ctx.state::<UsersState>().working().iter().any(|user| user.id.as_str() == id) {
        debug!("delete_user: no user {id}");
        return;
    }
    ctx.update::<UsersState>(|state| {
        state.delete_user(id);
    });
}

pub fn reset_to_snapshot(ctx: &mut StateCtx) {
    if ctx.state::<UsersState>().snapshot().is_none() {
        debug!("reset_to_snapshot: nothing loaded yet");
        return;
    }
    ctx.update::<UsersState>(|state| {
        state.reset_to_snapshot();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserEntity;

    fn user(id: &str, country: &str) -> UserEntity {
        UserEntity::new(id, "First", "Last", country, "https://example.com/p.jpg")
    }

    fn ctx_with(users: Vec<UserEntity>) -> StateCtx {
        let mut ctx = StateCtx::new();
        register(&mut ctx, BusinessConfig::default());
        ctx.update::<UsersState>(|state| {
            state.install_snapshot(users);
        });
        ctx.run_computed();
        ctx
    }

    fn rows(ctx: &StateCtx) -> Vec<(&str, &str)> {
        ctx.compute::<DerivedUsersCompute>()
            .rows()
            .iter()
            .map(|user| (user.id.as_str(), user.country.as_str()))
            .collect()
    }

    #[test]
    fn sort_toggle_reorders_and_restores() {
        let mut ctx = ctx_with(vec![user("1", "Spain"), user("2", "France"), user("3", "Chile")]);

        toggle_sort_by_country(&mut ctx);
        ctx.run_computed();
        assert_eq!(rows(&ctx), vec![("3", "Chile"), ("2", "France"), ("1", "Spain")]);

        toggle_sort_by_country(&mut ctx);
        ctx.run_computed();
        assert_eq!(rows(&ctx), vec![("1", "Spain"), ("2", "France"), ("3", "Chile")]);
    }

    #[test]
    fn delete_then_filter_then_reset() {
        let mut ctx = ctx_with(vec![user("a", "Spain"), user("b", "Spain"), user("c", "Chile")]);

        delete_user(&mut ctx, "a");
        set_filter_country(&mut ctx, "spa");
        ctx.run_computed();
        assert_eq!(rows(&ctx), vec![("b", "Spain")]);

        reset_to_snapshot(&mut ctx);
        ctx.run_computed();
        assert_eq!(rows(&ctx), vec![("a", "Spain"), ("b", "Spain")]);
        assert_eq!(ctx.state::<ViewControls>().filter_country(), Some("spa"));
    }

    #[test]
    fn coloring_does_not_rederive() {
        let mut ctx = ctx_with(vec![user("a", "Spain")]);
        let generation = ctx.compute::<DerivedUsersCompute>().generation();

        toggle_color_columns(&mut ctx);
        ctx.run_computed();

        assert!(ctx.state::<TableStyle>().color_columns());
        assert_eq!(ctx.compute::<DerivedUsersCompute>().generation(), generation);
    }

    #[test]
    fn unchanged_filter_does_not_rederive() {
        let mut ctx = ctx_with(vec![user("a", "Spain")]);
        set_filter_country(&mut ctx, "sp");
        ctx.run_computed();
        let generation = ctx.compute::<DerivedUsersCompute>().generation();

        set_filter_country(&mut ctx, "sp");
        ctx.run_computed();
        assert_eq!(ctx.compute::<DerivedUsersCompute>().generation(), generation);

        // "" and no filter derive the same rows.
        set_filter_country(&mut ctx, "");
        ctx.run_computed();
        let cleared = ctx.compute::<DerivedUsersCompute>().generation();
        assert!(cleared > generation);
        assert_eq!(rows(&ctx), vec![("a", "Spain")]);
    }

    #[test]
    fn delete_unknown_id_changes_nothing() {
        let mut ctx = ctx_with(vec![user("a", "Spain")]);
        let version = ctx.state::<UsersState>().version();

        delete_user(&mut ctx, "zzz");
        ctx.run_computed();

        assert_eq!(ctx.state::<UsersState>().version(), version);
        assert_eq!(rows(&ctx), vec![("a", "Spain")]);
    }

    #[test]
    fn reset_before_load_is_noop() {
        let mut ctx = StateCtx::new();
        register(&mut ctx, BusinessConfig::default());
        ctx.run_computed();

        reset_to_snapshot(&mut ctx);
        ctx.run_computed();
        assert!(rows(&ctx).is_empty());
    }

    #[test]
    fn initial_load_is_requested_once() {
        let mut ctx = StateCtx::new();
        register(&mut ctx, BusinessConfig::default());

        assert!(request_initial_load(&mut ctx));
        assert!(!request_initial_load(&mut ctx));
        assert!(ctx.state::<UsersState>().load_requested());
    }
}
