//! Inventory steps (AAI): customer, subscription, cloud region link.

use tracing::info;

use super::ScenarioContext;
use crate::error::Result;
use crate::steps::{Phase, Step, StepContext};

type Ctx<'a> = StepContext<'a, ScenarioContext>;

/// Create the customer.
#[derive(Debug, Default)]
pub struct CustomerCreateStep;

impl Step<ScenarioContext> for CustomerCreateStep {
    fn description(&self) -> &str {
        "Create customer in AAI."
    }

    fn component(&self) -> &str {
        "AAI"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let inventory = &ctx.platform.inventory;
            if inventory.get_customer(ctx.customer())?.is_some() {
                info!("Customer {} already exists", ctx.customer());
                return Ok(());
            }
            inventory.create_customer(ctx.customer())?;
            info!("Customer {} created", ctx.customer());
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let inventory = &ctx.platform.inventory;
            if let Some(customer) = inventory.get_customer(ctx.customer())? {
                inventory.delete_customer(&customer)?;
                info!("Customer {} deleted", customer.global_customer_id);
            }
            Ok(())
        })
    }
}

/// Subscribe the customer to the service type.
#[derive(Debug, Default)]
pub struct ServiceSubscriptionCreateStep;

impl Step<ScenarioContext> for ServiceSubscriptionCreateStep {
    fn description(&self) -> &str {
        "Create service subscription in AAI."
    }

    fn component(&self) -> &str {
        "AAI"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let inventory = &ctx.platform.inventory;
            let (customer, service_type) = (ctx.customer(), ctx.subscription_type());
            if inventory.get_subscription(customer, service_type)?.is_some() {
                info!("Subscription {} of {} already exists", service_type, customer);
                return Ok(());
            }
            inventory.create_subscription(customer, service_type)?;
            info!("Subscription {} of {} created", service_type, customer);
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let inventory = &ctx.platform.inventory;
            let (customer, service_type) = (ctx.customer(), ctx.subscription_type());
            if let Some(subscription) = inventory.get_subscription(customer, service_type)? {
                inventory.delete_subscription(customer, &subscription)?;
                info!("Subscription {} of {} deleted", service_type, customer);
            }
            Ok(())
        })
    }
}

/// Relate the subscription to the tenant instances are placed in.
#[derive(Debug, Default)]
pub struct CloudRegionLinkStep;

impl Step<ScenarioContext> for CloudRegionLinkStep {
    fn description(&self) -> &str {
        "Connect service subscription with cloud region and tenant."
    }

    fn component(&self) -> &str {
        "AAI"
    }

    fn execute(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Execute, || {
            let inventory = &ctx.platform.inventory;
            let placement = ctx.placement();
            let (customer, service_type) = (ctx.customer(), ctx.subscription_type());
            if inventory.is_cloud_region_linked(customer, service_type, &placement)? {
                info!("Cloud region {} already linked", placement.cloud_region_id);
                return Ok(());
            }
            inventory.link_cloud_region(customer, service_type, &placement)?;
            info!(
                "Subscription {} linked to {}/{}",
                service_type, placement.cloud_region_id, placement.tenant_id
            );
            Ok(())
        })
    }

    fn cleanup(&mut self, ctx: &Ctx<'_>) -> Result<()> {
        ctx.store_state(&self.label(), Phase::Cleanup, || {
            let inventory = &ctx.platform.inventory;
            let placement = ctx.placement();
            let (customer, service_type) = (ctx.customer(), ctx.subscription_type());
            if inventory.is_cloud_region_linked(customer, service_type, &placement)? {
                inventory.unlink_cloud_region(customer, service_type, &placement)?;
                info!("Cloud region {} unlinked", placement.cloud_region_id);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;
    use crate::scenario::testing::mock_context;
    use crate::sdk::mock::Kind;
    use crate::steps::StepNode;

    fn chain() -> StepNode<ScenarioContext> {
        StepNode::new(CloudRegionLinkStep, true).with_step(
            StepNode::new(ServiceSubscriptionCreateStep, true)
                .with_step(StepNode::new(CustomerCreateStep, true)),
        )
    }

    #[test]
    fn chain_creates_then_removes_everything() {
        let (platform, ctx) = mock_context("basic_vm");
        let mut node = chain();

        node.execute(&ctx).unwrap();
        assert_eq!(platform.names(Kind::Customer), vec!["generic"]);
        assert_eq!(platform.names(Kind::Subscription), vec!["generic/basic_vm"]);
        assert_eq!(platform.names(Kind::CloudRegionLink).len(), 1);

        node.cleanup(&ctx).unwrap();
        assert!(platform.is_empty());
        assert_eq!(node.reports_collection().len(), 6);
        assert_eq!(node.reports_collection().failed_steps_num(), 0);
    }

    #[test]
    fn existing_customer_is_reused() {
        let (platform, ctx) = mock_context("basic_vm");
        platform.seed_customer("generic");
        let mut node = StepNode::new(CustomerCreateStep, true);

        node.execute(&ctx).unwrap();
        assert_eq!(platform.calls_to("create_customer"), 0);
    }

    #[test]
    fn cleanup_of_absent_entities_passes() {
        let (platform, ctx) = mock_context("basic_vm");
        let mut node = chain();

        node.cleanup(&ctx).unwrap();
        assert_eq!(platform.calls_to("delete_customer"), 0);
        assert_eq!(platform.calls_to("unlink_cloud_region"), 0);
        assert_eq!(node.reports_collection().len(), 3);
    }

    #[test]
    fn rejected_call_fails_the_step() {
        let (platform, ctx) = mock_context("basic_vm");
        platform.fail_on("create_subscription", "forbidden");
        let mut node = chain();

        let err = node.execute(&ctx).unwrap_err();
        assert!(matches!(err, HarnessError::Api { status: 500, .. }));
        let records = node.reports_collection().records();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].step_description,
            "[AAI] ServiceSubscriptionCreateStep: Create service subscription in AAI."
        );
    }
}
