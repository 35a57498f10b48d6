use chrono::{SecondsFormat, Utc};
use tracing::info;

use super::{Flow, Middleware};
use crate::request::Request;

/// Logs the timestamp, method and full path+query of every request, then
/// continues. Never short-circuits.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn handle(&self, req: &Request) -> Flow {
        let at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        info!(at = %at, method = req.method(), uri = %req.path_and_query(), "request");
        Flow::Continue
    }
}
