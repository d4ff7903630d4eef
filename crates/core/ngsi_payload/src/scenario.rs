use crate::EntityContext;
use crate::EntityInput;
use crate::StepTable;
use crate::SubscriptionContext;
use crate::SubscriptionInput;

/// The contexts of the current and previous steps of a test scenario.
///
/// Each step consumes the scenario and returns the next one, so a step can
/// only see the snapshot of the step right before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    entity: Option<EntityContext>,
    previous_entity: Option<EntityContext>,
    subscription: Option<SubscriptionContext>,
    previous_subscription: Option<SubscriptionContext>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(self, input: EntityInput) -> Self {
        let entity = input.resolve(self.entity.as_ref());
        Scenario {
            previous_entity: self.entity,
            entity: Some(entity),
            ..self
        }
    }

    pub fn with_entity_table(self, table: &StepTable) -> Self {
        self.with_entity(EntityInput::from_table(table))
    }

    pub fn with_subscription(self, input: SubscriptionInput) -> Self {
        let subscription = input.resolve(self.subscription.as_ref());
        Scenario {
            previous_subscription: self.subscription,
            subscription: Some(subscription),
            ..self
        }
    }

    pub fn with_subscription_table(self, table: &StepTable) -> Self {
        self.with_subscription(SubscriptionInput::from_table(table))
    }

    pub fn entity(&self) -> Option<&EntityContext> {
        self.entity.as_ref()
    }

    pub fn previous_entity(&self) -> Option<&EntityContext> {
        self.previous_entity.as_ref()
    }

    pub fn subscription(&self) -> Option<&SubscriptionContext> {
        self.subscription.as_ref()
    }

    pub fn previous_subscription(&self) -> Option<&SubscriptionContext> {
        self.previous_subscription.as_ref()
    }
}
