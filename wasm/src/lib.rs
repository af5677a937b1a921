//! Tracker WASM Module
//!
//! Browser bindings for the derived-metric formulas, so a web front-end
//! computes exactly what the CLI does.

use tracker_shared::health_metrics::{self, HydrationStatus};
use tracker_shared::models::{Gender, User};
use wasm_bindgen::prelude::*;

/// BMI from weight (kg) and height (cm); `undefined` for non-positive input
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    health_metrics::calculate_bmi(weight_kg, height_cm)
}

/// BMI category description ("Normal weight", ...)
#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> String {
    health_metrics::classify_bmi(bmi).description().to_string()
}

/// Harris-Benedict BMR; gender is "M" or "F"
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: &str) -> Option<f64> {
    let gender = match gender {
        "M" | "male" => Gender::Male,
        "F" | "female" => Gender::Female,
        _ => Gender::Other,
    };
    health_metrics::calculate_bmr(Some(weight_kg), Some(height_cm), Some(age_years), Some(gender))
}

/// Unclamped hydration percentage
#[wasm_bindgen]
pub fn hydration_percentage(intake_ml: u32, goal_ml: u32) -> f64 {
    health_metrics::hydration_percentage(intake_ml, goal_ml)
}

#[wasm_bindgen]
pub fn hydration_status(percentage: f64) -> String {
    HydrationStatus::from_percentage(percentage).label().to_string()
}

/// Completion rate as displayed, "N/A" with no history
#[wasm_bindgen]
pub fn completion_rate(completed: u32, total: u32) -> String {
    health_metrics::format_completion_rate(completed, total)
}

/// BMI and BMR for a profile JSON object, as JSON
#[wasm_bindgen]
pub fn body_metrics_json(user_json: &str) -> Result<String, JsValue> {
    let user: User =
        serde_json::from_str(user_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&health_metrics::body_metrics(&user))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 175.0).unwrap();
        assert!((bmi - 22.86).abs() < 0.1);
        assert_eq!(bmi_category(bmi), "Normal weight");
        assert!(calculate_bmi(70.0, 0.0).is_none());
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn test_bmr_other_gender_is_undefined() {
        assert!(calculate_bmr(70.0, 175.0, 30, "M").is_some());
        assert!(calculate_bmr(70.0, 175.0, 30, "O").is_none());
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn test_hydration() {
        let pct = hydration_percentage(2000, 2000);
        assert_eq!(pct, 100.0);
        assert_eq!(hydration_status(pct), "Excellent!");
        assert_eq!(completion_rate(0, 0), "N/A");
    }
}
