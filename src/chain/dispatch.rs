use anyhow::Result;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use super::outcome::Outcome;
use super::report::{DispatchReport, InvocationStatus};
use crate::modules::{Capability, ModuleRegistry};

/// Runs a capability across its registered modules and merges their answers.
///
/// Modules are asked one at a time, in registry order:
///
/// * while nothing has been contributed, each answer replaces the aggregate;
/// * once the aggregate is a list, list answers are appended and any other
///   answer is dropped;
/// * once the aggregate is a single value, the remaining modules are skipped.
///
/// A module that errors or panics is logged and counts as having contributed
/// nothing. The dispatcher keeps no state between calls.
pub struct Dispatcher<R: ModuleRegistry> {
    registry: Arc<R>,
}

impl<R: ModuleRegistry> Dispatcher<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub async fn run_module<'f, C, T, F>(&self, invoke: F) -> Outcome<T>
    where
        C: Capability + ?Sized,
        F: Fn(Arc<C>) -> BoxFuture<'f, Result<Outcome<T>>>,
    {
        self.run_module_with_report(invoke).await.0
    }

    /// Same as [`Dispatcher::run_module`], also returning what each module did.
    pub async fn run_module_with_report<'f, C, T, F>(
        &self,
        invoke: F,
    ) -> (Outcome<T>, DispatchReport)
    where
        C: Capability + ?Sized,
        F: Fn(Arc<C>) -> BoxFuture<'f, Result<Outcome<T>>>,
    {
        let modules = self.registry.get_modules::<C>();
        let mut report = DispatchReport::new(C::NAME);
        let mut aggregated = Outcome::Empty;

        log::debug!("Running {} across {} module(s)", C::NAME, modules.len());

        let invoke = &invoke;
        for module in modules {
            let name = module.name().to_string();

            if let Outcome::Scalar(_) = aggregated {
                log::trace!("Skipping {} for {}: already answered", name, C::NAME);
                report.record(name, InvocationStatus::Skipped);
                continue;
            }

            // Calling `invoke` inside the caught future also contains panics
            // raised before the module's future exists.
            let call = async move { invoke(module).await };
            let status = match AssertUnwindSafe(call).catch_unwind().await {
                Ok(Ok(contribution)) => absorb(&mut aggregated, contribution, C::NAME, &name),
                Ok(Err(err)) => {
                    log::error!("Module {} failed running {}: {:#}", name, C::NAME, err);
                    InvocationStatus::Failed(format!("{:#}", err))
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    log::error!("Module {} panicked running {}: {}", name, C::NAME, message);
                    InvocationStatus::Failed(format!("panicked: {}", message))
                }
            };

            report.record(name, status);
        }

        (aggregated, report)
    }
}

fn absorb<T>(
    aggregated: &mut Outcome<T>,
    contribution: Outcome<T>,
    capability: &str,
    module: &str,
) -> InvocationStatus {
    match aggregated {
        Outcome::Empty => {
            if contribution.is_empty() {
                return InvocationStatus::Empty;
            }
            *aggregated = contribution;
            InvocationStatus::Contributed
        }
        Outcome::Sequence(items) => match contribution {
            Outcome::Sequence(more) => {
                items.extend(more);
                InvocationStatus::Contributed
            }
            Outcome::Empty => InvocationStatus::Empty,
            Outcome::Scalar(_) => {
                log::debug!(
                    "Dropping single-value answer from {} for {}: expected a list",
                    module,
                    capability
                );
                InvocationStatus::Dropped
            }
        },
        // Callers stop before invoking once a single value is held.
        Outcome::Scalar(_) => InvocationStatus::Skipped,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
