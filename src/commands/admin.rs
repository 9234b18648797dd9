use crate::context::AdminContext;
use crate::output::{report, report_err};

pub const SHUTDOWN_PATH: &str = "/api/admin/shutdown/";

/// Buckets the server can dump to its own log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    UserEmail,
    UserAuth,
    AdminEmail,
    ModExim,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::UserEmail,
        Bucket::UserAuth,
        Bucket::AdminEmail,
        Bucket::ModExim,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::UserEmail => "USER_EMAIL",
            Bucket::UserAuth => "USER_AUTH",
            Bucket::AdminEmail => "ADMIN_EMAIL",
            Bucket::ModExim => "MOD_EXIM",
        }
    }

    /// USER_EMAIL is keyed by address rather than id, so the server
    /// exposes it on a separate route.
    pub fn path(self) -> String {
        match self {
            Bucket::UserEmail => format!("/api/admin/log-bucket-custom-key/{}", self.name()),
            _ => format!("/api/admin/log-bucket/{}", self.name()),
        }
    }

    pub fn label(self) -> String {
        format!("Log {} Bucket", self.name())
    }
}

/// Ask the server to shut down, printing the outcome. Returns whether the
/// request went through.
pub fn request_shutdown(ctx: &AdminContext) -> bool {
    match ctx.api.admin_post(SHUTDOWN_PATH) {
        Ok(resp) => {
            report(&format!("response status: {}", resp.status));
            report(&format!("response body: {}", resp.body));
            true
        }
        Err(e) => {
            report_err(&format!("shutting down server: {e}"));
            false
        }
    }
}

pub fn shutdown(ctx: &AdminContext) {
    request_shutdown(ctx);
}

pub fn log_bucket(ctx: &AdminContext, bucket: Bucket) {
    match ctx.api.admin_post(&bucket.path()) {
        Ok(resp) => report(&format!("response status: {}", resp.status)),
        Err(e) => report_err(&format!("logging {} bucket: {e}", bucket.name())),
    }
}
