use serde::{Deserialize, Serialize};

use crate::profile::{
    Area, AssessmentProfile, Gender, IncomeBracket, MaritalStatus, PolicyType, Qualification,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    pub gender: Option<Gender>,
    pub area: Option<Area>,
    pub qualification: Option<Qualification>,
    pub income: Option<IncomeBracket>,
    pub vintage: Option<u32>,
    pub claim_amount: Option<u64>,
    pub policies_count: Option<u32>,
    pub policies_chosen: Option<String>,
    pub policy_type: Option<PolicyType>,
    pub marital_status: Option<MaritalStatus>,
}

pub fn build_profile(customer_ref: &str, overrides: &ProfileOverrides) -> AssessmentProfile {
    let mut profile = AssessmentProfile::sample(customer_ref);
    apply_overrides(&mut profile, overrides);
    profile
}

pub fn apply_overrides(profile: &mut AssessmentProfile, overrides: &ProfileOverrides) {
    if let Some(v) = overrides.gender {
        profile.gender = v;
    }
    if let Some(v) = overrides.area {
        profile.area = v;
    }
    if let Some(v) = overrides.qualification {
        profile.qualification = v;
    }
    if let Some(v) = overrides.income {
        profile.income = v;
    }
    if let Some(v) = overrides.vintage {
        profile.vintage = v;
    }
    if let Some(v) = overrides.claim_amount {
        profile.claim_amount = v;
    }
    if let Some(v) = overrides.policies_count {
        profile.policies_count = v;
    }
    if let Some(v) = &overrides.policies_chosen {
        profile.policies_chosen = v.clone();
    }
    if let Some(v) = overrides.policy_type {
        profile.policy_type = v;
    }
    if let Some(v) = overrides.marital_status {
        profile.marital_status = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_provided_fields() {
        let overrides = ProfileOverrides {
            income: Some(IncomeBracket::AboveFifteenL),
            vintage: Some(6),
            ..ProfileOverrides::default()
        };
        let profile = build_profile("cust-7", &overrides);
        assert_eq!(profile.income, IncomeBracket::AboveFifteenL);
        assert_eq!(profile.vintage, 6);
        assert_eq!(profile.area, Area::Urban);
        assert_eq!(profile.policies_chosen, "health");
    }
}
