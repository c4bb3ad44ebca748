//! Entitlement: subscription state and tiered content visibility.

mod resolver;
mod subscription;

pub use resolver::{EntitlementPolicy, EntitlementResolver, VisibleScenarios};
pub use subscription::{Subscription, SubscriptionStatus};
