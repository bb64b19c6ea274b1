//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! timing and logging.

use std::future::Future;
use std::time::Instant;

use academy_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &AppContext, student_id: &str) -> DomainResult<MyResponse> {
///     execute_with_logging("my_module::my_command", || async {
///         ctx.some_service.do_something(student_id).await
///     })
///     .await
/// }
/// ```
pub async fn execute_with_logging<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let elapsed = start.elapsed();
    let error_type = result.as_ref().err().map(error_label);
    log_command_execution(command_name, elapsed, error_type);

    result
}
