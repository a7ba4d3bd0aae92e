use chrono::Utc;

use crate::context::AppContext;
use crate::domain::summary::InvocationResponse;
use crate::workflow::scan::run_scan;

pub async fn run(ctx: &AppContext) -> InvocationResponse {
    run_scan(ctx, Utc::now()).await
}
