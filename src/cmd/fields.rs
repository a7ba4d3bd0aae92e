use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::fields::{FieldReport, inspect_field};

#[derive(Debug, Clone)]
pub struct FieldsCommandArgs {
    pub field_id: String,
}

pub async fn run(ctx: &AppContext, args: FieldsCommandArgs) -> AppResult<FieldReport> {
    inspect_field(ctx, args.field_id.trim()).await
}
