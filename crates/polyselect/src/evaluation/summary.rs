//! Textual summary of the terminal regression model.
//!
//! ## Purpose
//!
//! This module renders the final model's fit statistics as a regression
//! results table, or a short message when there is nothing to summarise.
//!
//! ## Design notes
//!
//! * **Read-only**: Summaries borrow the final model and never modify it.
//! * **Display-driven**: All output goes through `Display`, so callers decide
//!   where it is printed or logged.
//!
//! ## Non-goals
//!
//! * This module does not compute statistics (handled by the regression oracle).

use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

use crate::algorithms::design::INTERCEPT_NAME;
use crate::algorithms::regression::{CoefficientStats, OlsFit};

/// Width of the rule lines framing the table.
const TABLE_WIDTH: usize = 78;

/// Outcome of asking a selector for its summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Summary<'a, T> {
    /// A terminal model exists; holds its fit.
    Model(&'a OlsFit<T>),

    /// Selection finished without selecting any term.
    NoFeatures,

    /// Selection has not been finalized yet.
    NotFitted,
}

impl<T> Summary<'_, T> {
    /// True when a model table will be rendered.
    pub fn has_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}

impl<T: Float + Display> Display for Summary<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Model(fit) => write_model(f, fit),
            Self::NoFeatures => {
                writeln!(f, "No features were selected. Cannot produce a summary.")
            }
            Self::NotFitted => writeln!(
                f,
                "The model has not been fitted yet. Call `fit` (or `run`) first."
            ),
        }
    }
}

fn write_model<T: Float + Display>(f: &mut Formatter<'_>, fit: &OlsFit<T>) -> Result {
    writeln!(f, "{:^width$}", "OLS Regression Results", width = TABLE_WIDTH)?;
    writeln!(f, "{:=<width$}", "", width = TABLE_WIDTH)?;
    writeln!(
        f,
        "{:<20}{:>18}   {:<22}{:>15.4}",
        "Dep. Variable:", "y", "R-squared:", fit.r_squared
    )?;
    writeln!(
        f,
        "{:<20}{:>18}   {:<22}{:>15.4}",
        "Model:", "OLS", "Adj. R-squared:", fit.adj_r_squared
    )?;
    writeln!(
        f,
        "{:<20}{:>18}   {:<22}{:>15.4}",
        "No. Observations:", fit.n_obs, "F-statistic:", fit.f_statistic
    )?;
    writeln!(
        f,
        "{:<20}{:>18}   {:<22}{:>15.3e}",
        "Df Residuals:",
        fit.df_resid,
        "Prob (F-statistic):",
        fit.f_p_value.to_f64().unwrap_or(f64::NAN)
    )?;
    writeln!(
        f,
        "{:<20}{:>18}   {:<22}{:>15.4}",
        "Df Model:", fit.df_model, "Log-Likelihood:", fit.log_likelihood
    )?;
    writeln!(f, "{:<41}{:<22}{:>15.4}", "", "AIC:", fit.aic)?;
    writeln!(f, "{:<41}{:<22}{:>15.4}", "", "BIC:", fit.bic)?;
    writeln!(f, "{:=<width$}", "", width = TABLE_WIDTH)?;

    writeln!(
        f,
        "{:<16}{:>10} {:>10} {:>9} {:>8} {:>10} {:>10}",
        "", "coef", "std err", "t", "P>|t|", "[0.025", "0.975]"
    )?;
    writeln!(f, "{:-<width$}", "", width = TABLE_WIDTH)?;

    write_row(f, INTERCEPT_NAME, &fit.intercept)?;
    for (term, stats) in &fit.terms {
        write_row(f, term.canonical(), stats)?;
    }

    writeln!(f, "{:=<width$}", "", width = TABLE_WIDTH)
}

fn write_row<T: Float + Display>(
    f: &mut Formatter<'_>,
    name: &str,
    stats: &CoefficientStats<T>,
) -> Result {
    writeln!(
        f,
        "{:<16}{:>10.4} {:>10.3} {:>9.3} {:>8.3} {:>10.3} {:>10.3}",
        name,
        stats.estimate,
        stats.std_error,
        stats.t_value,
        stats.p_value,
        stats.conf_lower,
        stats.conf_upper
    )
}
