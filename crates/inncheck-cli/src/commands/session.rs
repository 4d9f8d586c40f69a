use super::Context;
use crate::output::print_one;
use crate::state::AppState;
use inncheck_core::{Operator, OperatorRole};

pub fn login(
    ctx: &Context,
    state: &mut AppState,
    name: &str,
    role: OperatorRole,
) -> anyhow::Result<()> {
    let operator = Operator::new(name, role)?;
    tracing::info!(operator = %operator.name, %role, "Operator logged in");
    state.operator = Some(operator.clone());
    print_one(ctx.json, operator, |op| format!("logged in as {} ({})", op.name, op.role))
}

pub fn logout(ctx: &Context, state: &mut AppState) -> anyhow::Result<()> {
    let previous = state.operator.take();
    if let Some(op) = &previous {
        tracing::info!(operator = %op.name, "Operator logged out");
    }
    print_one(ctx.json, previous, |op| match op {
        Some(op) => format!("logged out {}", op.name),
        None => "no operator logged in".to_string(),
    })
}
