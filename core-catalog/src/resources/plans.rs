//! Subscription plans resource

use crate::models::{ResourceKind, SubscriptionPlan};
use crate::payload::{Payload, ValidationErrors, Validator, WriteMode};
use crate::resources::{ResourceDesc, ResourceDraft, Routes};

static ROUTES: Routes = Routes {
    list: "/subscriptions/getAll",
    by_id: "/subscriptions",
    create: "/subscriptions/add",
    update: "/subscriptions",
    delete: "/subscriptions",
    toggle_status: Some("/subscriptions"),
};

/// Descriptor for the subscription plan screen.
///
/// Plans are the one resource with a status toggle endpoint, flipped
/// independently of editing.
pub struct Plans;

impl ResourceDesc for Plans {
    type Model = SubscriptionPlan;
    type Draft = PlanDraft;

    fn kind() -> ResourceKind {
        ResourceKind::SubscriptionPlan
    }

    fn routes() -> &'static Routes {
        &ROUTES
    }

    fn collection_keys() -> &'static [&'static str] {
        &["subscriptions", "plans"]
    }
}

/// Input for creating or updating a subscription plan.
///
/// Plans carry no file fields, so the payload always encodes as JSON.
#[derive(Debug, Clone, Default)]
pub struct PlanDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub benefits: Vec<String>,
    pub limitations: Vec<String>,
    pub is_active: bool,
}

impl PlanDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            duration: "monthly".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_benefits<I, S>(mut self, benefits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.benefits = benefits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limitations<I, S>(mut self, limitations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.limitations = limitations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl ResourceDraft for PlanDraft {
    fn validate(&self, _mode: WriteMode) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.require_text("name", &self.name, "Plan name is required");
        v.require_text("description", &self.description, "Description is required");
        v.require_positive("price", self.price, "Valid price is required");
        v.require(
            "benefits",
            self.benefits.iter().any(|b| !b.trim().is_empty()),
            "At least one benefit is required",
        );
        v.finish()
    }

    fn into_payload(self) -> Payload {
        Payload::new()
            .text("name", &self.name)
            .text("description", &self.description)
            .number("price", self.price)
            .text("duration", &self.duration)
            .list("benefits", &self.benefits)
            .list("limitations", &self.limitations)
            .flag("isActive", self.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::EncodedBody;

    fn draft() -> PlanDraft {
        PlanDraft::new("Premium", 9.99)
            .with_description("Everything, no ads")
            .with_benefits(["Offline listening", "Lossless audio"])
            .with_limitations(["Single device"])
    }

    #[test]
    fn test_price_must_be_positive() {
        let errors = PlanDraft::new("Free", 0.0)
            .with_description("d")
            .with_benefits(["b"])
            .validate(WriteMode::Create)
            .unwrap_err();
        assert_eq!(errors.field("price"), Some("Valid price is required"));
    }

    #[test]
    fn test_requires_a_benefit() {
        let errors = PlanDraft::new("Premium", 9.99)
            .with_description("d")
            .with_benefits(["   "])
            .validate(WriteMode::Create)
            .unwrap_err();
        assert!(errors.field("benefits").is_some());
    }

    #[test]
    fn test_payload_is_always_json() {
        match draft().into_payload().encode() {
            EncodedBody::Json(value) => {
                assert_eq!(value["price"], 9.99);
                assert_eq!(
                    value["benefits"],
                    serde_json::json!(["Offline listening", "Lossless audio"])
                );
            }
            _ => panic!("expected JSON"),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate(WriteMode::Create).is_ok());
    }
}
