//! Built-in health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it serve traffic? Failure → pulled from the load balancer. |
//!
//! Both live outside the authenticated prefix and ignore the router state.

use crate::error::ApiError;
use crate::request::Request;

/// Always `200 OK` with body `"ok"`. If the process answers HTTP at all, it
/// is alive.
pub async fn liveness<S>(_req: Request, _state: S) -> Result<&'static str, ApiError> {
    Ok("ok")
}

/// `200 OK` with body `"ready"`. The store lives in memory, so there is
/// nothing to wait for.
pub async fn readiness<S>(_req: Request, _state: S) -> Result<&'static str, ApiError> {
    Ok("ready")
}
