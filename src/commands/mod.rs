pub mod admin;
pub mod api;
pub mod e2e;
pub mod provision;
pub mod user;

use std::rc::Rc;

use crate::context::AdminContext;
use crate::menu::{Group, Menu, MenuError};

use admin::Bucket;

/// Wrap a context-taking command into the zero-argument shape menu
/// entries hold.
fn bind(ctx: Rc<AdminContext>, f: fn(&AdminContext)) -> impl Fn() + 'static {
    move || f(&ctx)
}

/// The full command table, bound to `ctx`.
pub fn build_menu(ctx: Rc<AdminContext>) -> Result<Menu, MenuError> {
    let provision_local = Group::new("PROVISION LOCAL").command(
        "Copy Private Key to Local API Server",
        bind(Rc::clone(&ctx), provision::copy_private_key_local),
    );

    let api = Group::new("API").command("Signup New User", bind(Rc::clone(&ctx), user::signup));

    let mut admin_group = Group::new("ADMIN")
        .command("Shutdown Server", bind(Rc::clone(&ctx), admin::shutdown));
    for bucket in Bucket::ALL {
        let ctx = Rc::clone(&ctx);
        admin_group = admin_group.command(bucket.label(), move || admin::log_bucket(&ctx, bucket));
    }

    let e2e = Group::new("E2E").command(
        "Run E2E Locally",
        bind(Rc::clone(&ctx), e2e::run_e2e_local),
    );

    Menu::new(vec![provision_local, api, admin_group, e2e])
}
