use clap::Parser;

use crate::{
    core::planner::{Horizon, LoadPlanner},
    prelude::*,
    quantity::percent::Percent,
};

#[derive(Copy, Clone, Parser)]
pub struct PlannerArgs {
    /// Round-trip loss of charging and later discharging the battery, in percent.
    #[clap(
        long = "loss-margin-percent",
        env = "LOSS_MARGIN_PERCENT",
        default_value = "20",
        value_parser = parse_loss_margin,
    )]
    loss_margin: Percent,

    /// Let the last slot of a period qualify for discharging too.
    #[clap(long, env = "PLAN_THROUGH_LAST_SLOT")]
    plan_through_last_slot: bool,
}

impl PlannerArgs {
    pub fn planner(self) -> LoadPlanner {
        LoadPlanner::builder()
            .loss_margin(self.loss_margin)
            .horizon(if self.plan_through_last_slot {
                Horizon::IncludeLastSlot
            } else {
                Horizon::ExcludeLastSlot
            })
            .build()
    }
}

fn parse_loss_margin(value: &str) -> Result<Percent> {
    let loss_margin: Percent = value.parse().context("not a number")?;
    ensure!(
        loss_margin.0.is_finite() && loss_margin >= Percent::ZERO,
        "the loss margin must be a non-negative number",
    );
    Ok(loss_margin)
}
