//! Fitness metrics calculations module
//!
//! Computes the fitness report shown by the public calculator: BMI and its
//! category, BMR, goal-adjusted daily calories, water intake, ideal weight
//! range, macro split and a BMI-based body-fat estimate.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Convert First**: Every formula runs on kg and cm, never raw imperial input
//! 3. **Report, Don't Correct**: Odd-looking results are flagged, never clamped
//! 4. **Type Safety**: Units, sex, activity level and goal are closed enums

use crate::errors::InvalidInputError;
use crate::units::{HeightUnit, WeightUnit};
use crate::validation::{check_field, validate_age, validate_height, validate_weight};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy density of protein (kcal per gram)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate (kcal per gram)
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy density of fat (kcal per gram)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Liters of water recommended per kg of body weight
pub const WATER_LITERS_PER_KG: f64 = 0.033;

/// Daily intake below which the report carries a warning
pub const MINIMUM_RECOMMENDED_CALORIES: i32 = 1200;

/// Flat daily adjustment applied for lose/gain goals
const GOAL_CALORIE_ADJUSTMENT: i32 = 500;

// ============================================================================
// Input Types
// ============================================================================

/// Biological sex for the BMR and body-fat formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl std::str::FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(format!("Unknown sex: {}. Must be one of: male, female", s)),
        }
    }
}

/// Activity level used to scale BMR into a daily calorie target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

impl ActivityLevel {
    /// Every level, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Get the activity multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Very hard exercise or physical job",
        }
    }

    /// Wire name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The calculator form posts camelCase, the API documents snake_case
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightlyactive" => Ok(ActivityLevel::Light),
            "moderate" | "moderatelyactive" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "veryactive" | "extraactive" => Ok(ActivityLevel::VeryActive),
            _ => Err(format!(
                "Unknown activity level: {}. Must be one of: sedentary, light, moderate, active, very_active",
                s
            )),
        }
    }
}

/// Share of daily calories given to each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Weight goal selected on the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    /// Flat kcal/day offset applied after the activity multiplier
    pub fn calorie_offset(&self) -> i32 {
        match self {
            Goal::Lose => -GOAL_CALORIE_ADJUSTMENT,
            Goal::Maintain => 0,
            Goal::Gain => GOAL_CALORIE_ADJUSTMENT,
        }
    }

    /// Macro split for this goal
    pub fn macro_ratios(&self) -> MacroRatios {
        match self {
            Goal::Lose => MacroRatios {
                protein: 0.40,
                carbs: 0.35,
                fats: 0.25,
            },
            Goal::Maintain | Goal::Gain => MacroRatios {
                protein: 0.30,
                carbs: 0.50,
                fats: 0.20,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" | "lose_weight" | "loss" => Ok(Goal::Lose),
            "maintain" | "maintenance" => Ok(Goal::Maintain),
            "gain" | "gain_weight" => Ok(Goal::Gain),
            _ => Err(format!("Unknown goal: {}. Must be one of: lose, maintain, gain", s)),
        }
    }
}

/// Everything the calculator needs, as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessInput {
    /// Weight in `weight_unit`
    pub weight: f64,
    pub weight_unit: WeightUnit,
    /// Height in `height_unit`
    pub height: f64,
    pub height_unit: HeightUnit,
    /// Age in whole years
    pub age_years: i32,
    pub sex: BiologicalSex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl FitnessInput {
    /// Weight converted to kilograms
    pub fn weight_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight)
    }

    /// Height converted to centimeters
    pub fn height_cm(&self) -> f64 {
        self.height_unit.to_cm(self.height)
    }

    /// Check preconditions, failing on the first bad field
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        check_field("weight", || validate_weight(self.weight))?;
        check_field("height", || validate_height(self.height))?;
        check_field("age", || validate_age(self.age_years))?;
        Ok(())
    }
}

// ============================================================================
// Report Types
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the half-open BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::NormalWeight => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Healthy weight band for a height, whole kilograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealWeightRange {
    pub min: i32,
    pub max: i32,
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fats_g: i32,
}

impl Macros {
    /// Energy the macros add up to, in kcal
    pub fn total_kcal(&self) -> f64 {
        self.protein_g as f64 * KCAL_PER_GRAM_PROTEIN
            + self.carbs_g as f64 * KCAL_PER_GRAM_CARBS
            + self.fats_g as f64 * KCAL_PER_GRAM_FAT
    }
}

/// Conditions worth pointing out next to the numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportWarning {
    /// The BMI-based body-fat proxy came out below zero
    NegativeBodyFatEstimate,
    /// Daily target is under the commonly recommended minimum
    CaloriesBelowMinimum,
}

impl ReportWarning {
    pub fn description(&self) -> &'static str {
        match self {
            ReportWarning::NegativeBodyFatEstimate => {
                "Body-fat estimate is below zero; the BMI-based formula is unreliable for this input"
            }
            ReportWarning::CaloriesBelowMinimum => {
                "Daily calorie target is below 1200 kcal; consult a professional before following it"
            }
        }
    }
}

/// Complete calculator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessReport {
    /// BMI, one decimal
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    /// Basal metabolic rate, whole kcal/day
    pub bmr: f64,
    /// Goal-adjusted daily target, kcal/day
    pub daily_calories: i32,
    /// Liters per day, two decimals
    pub water_intake_liters: f64,
    pub ideal_weight_range_kg: IdealWeightRange,
    pub macros: Macros,
    /// Body-fat percentage, one decimal; may be negative
    pub body_fat_percent: f64,
    #[serde(default)]
    pub warnings: Vec<ReportWarning>,
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Ideal weight range for a height
///
/// Based on BMI 18.5-24.9, rounded to whole kilograms
pub fn ideal_weight_range_kg(height_cm: f64) -> IdealWeightRange {
    let height_m = height_cm / 100.0;
    let height_m_sq = height_m * height_m;
    IdealWeightRange {
        min: (18.5 * height_m_sq).round() as i32,
        max: (24.9 * height_m_sq).round() as i32,
    }
}

// ============================================================================
// BMR and Calorie Calculations
// ============================================================================

/// Calculate BMR using Harris-Benedict equation (revised)
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn calculate_bmr_harris_benedict(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: BiologicalSex,
) -> f64 {
    match sex {
        BiologicalSex::Male => {
            88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age_years as f64
        }
        BiologicalSex::Female => {
            447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age_years as f64
        }
    }
}

/// Daily calorie target
///
/// round(BMR × activity multiplier), then the goal's flat offset.
/// Saturates at the `i32` bounds for magnitudes no person reaches.
pub fn calculate_daily_calories(bmr: f64, activity_level: ActivityLevel, goal: Goal) -> i32 {
    let maintenance = (bmr * activity_level.multiplier()).round() as i32;
    maintenance.saturating_add(goal.calorie_offset())
}

// ============================================================================
// Hydration
// ============================================================================

/// Recommended daily water intake in liters, two decimals
pub fn calculate_water_intake_liters(weight_kg: f64) -> f64 {
    round_to(weight_kg * WATER_LITERS_PER_KG, 2)
}

// ============================================================================
// Macro Split
// ============================================================================

/// Split daily calories into protein, carbohydrate and fat grams
pub fn calculate_macros(daily_calories: i32, goal: Goal) -> Macros {
    let ratios = goal.macro_ratios();
    let calories = daily_calories as f64;
    Macros {
        protein_g: (calories * ratios.protein / KCAL_PER_GRAM_PROTEIN).round() as i32,
        carbs_g: (calories * ratios.carbs / KCAL_PER_GRAM_CARBS).round() as i32,
        fats_g: (calories * ratios.fats / KCAL_PER_GRAM_FAT).round() as i32,
    }
}

// ============================================================================
// Body Fat Estimation
// ============================================================================

/// Estimate body fat percentage from BMI (rough estimate)
///
/// Formula: BF% = 1.20 × BMI + 0.23 × Age - 16.2 (men) or - 5.4 (women)
///
/// Not clamped: young, low-BMI inputs produce negative values.
pub fn estimate_body_fat(bmi: f64, age_years: i32, sex: BiologicalSex) -> f64 {
    let constant = match sex {
        BiologicalSex::Male => 16.2,
        BiologicalSex::Female => 5.4,
    };
    round_to(1.20 * bmi + 0.23 * age_years as f64 - constant, 1)
}

// ============================================================================
// Orchestration
// ============================================================================

/// Compute the full fitness report
///
/// Fails only when the input breaks a precondition; the first offending
/// field is named in the error.
pub fn calculate(input: &FitnessInput) -> Result<FitnessReport, InvalidInputError> {
    input.validate()?;

    let weight_kg = input.weight_kg();
    let height_cm = input.height_cm();

    // Category and body fat use the reported value so they agree with it
    let bmi = round_to(calculate_bmi(weight_kg, height_cm), 1);
    let bmi_category = classify_bmi(bmi);

    let bmr = calculate_bmr_harris_benedict(weight_kg, height_cm, input.age_years, input.sex)
        .round();
    let daily_calories = calculate_daily_calories(bmr, input.activity_level, input.goal);
    let macros = calculate_macros(daily_calories, input.goal);
    let body_fat_percent = estimate_body_fat(bmi, input.age_years, input.sex);

    let mut warnings = Vec::new();
    if body_fat_percent < 0.0 {
        warnings.push(ReportWarning::NegativeBodyFatEstimate);
    }
    if daily_calories < MINIMUM_RECOMMENDED_CALORIES {
        warnings.push(ReportWarning::CaloriesBelowMinimum);
    }

    Ok(FitnessReport {
        bmi,
        bmi_category,
        bmr,
        daily_calories,
        water_intake_liters: calculate_water_intake_liters(weight_kg),
        ideal_weight_range_kg: ideal_weight_range_kg(height_cm),
        macros,
        body_fat_percent,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn metric_input(
        weight_kg: f64,
        height_cm: f64,
        age_years: i32,
        sex: BiologicalSex,
        activity_level: ActivityLevel,
        goal: Goal,
    ) -> FitnessInput {
        FitnessInput {
            weight: weight_kg,
            weight_unit: WeightUnit::Kg,
            height: height_cm,
            height_unit: HeightUnit::Cm,
            age_years,
            sex,
            activity_level,
            goal,
        }
    }

    fn sex_strategy() -> impl Strategy<Value = BiologicalSex> {
        prop_oneof![Just(BiologicalSex::Male), Just(BiologicalSex::Female)]
    }

    fn activity_strategy() -> impl Strategy<Value = ActivityLevel> {
        prop::sample::select(ActivityLevel::ALL.to_vec())
    }

    fn goal_strategy() -> impl Strategy<Value = Goal> {
        prop_oneof![Just(Goal::Lose), Just(Goal::Maintain), Just(Goal::Gain)]
    }

    // =========================================================================
    // Reference Scenarios
    // =========================================================================

    #[test]
    fn test_reference_metric_male() {
        let input = metric_input(
            70.0,
            175.0,
            30,
            BiologicalSex::Male,
            ActivityLevel::Moderate,
            Goal::Maintain,
        );
        let report = calculate(&input).unwrap();

        assert_eq!(report.bmi, 22.9);
        assert_eq!(report.bmi_category, BmiCategory::NormalWeight);
        // 88.362 + 937.79 + 839.825 - 170.31 = 1695.667
        assert_eq!(report.bmr, 1696.0);
        assert_eq!(report.daily_calories, 2629);
        assert_eq!(report.water_intake_liters, 2.31);
        assert_eq!(report.ideal_weight_range_kg, IdealWeightRange { min: 57, max: 76 });
        assert_eq!(
            report.macros,
            Macros {
                protein_g: 197,
                carbs_g: 329,
                fats_g: 58
            }
        );
        assert_eq!(report.body_fat_percent, 18.2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_reference_imperial_female_converts_first() {
        let input = FitnessInput {
            weight: 154.0,
            weight_unit: WeightUnit::Lbs,
            height: 68.0,
            height_unit: HeightUnit::Inch,
            age_years: 25,
            sex: BiologicalSex::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Lose,
        };
        let report = calculate(&input).unwrap();

        // 69.853168 kg / 1.7272 m² = 23.415
        assert_eq!(report.bmi, 23.4);
        assert_eq!(report.bmi_category, BmiCategory::NormalWeight);
        assert_eq!(report.bmr, 1520.0);
        assert_eq!(report.daily_calories, 1324);
        assert_eq!(report.water_intake_liters, 2.31);
        assert_eq!(report.ideal_weight_range_kg, IdealWeightRange { min: 55, max: 74 });
        assert_eq!(
            report.macros,
            Macros {
                protein_g: 132,
                carbs_g: 116,
                fats_g: 37
            }
        );
        assert_eq!(report.body_fat_percent, 28.4);

        // Same numbers as entering the converted values directly
        let metric = metric_input(
            input.weight_kg(),
            input.height_cm(),
            25,
            BiologicalSex::Female,
            ActivityLevel::Sedentary,
            Goal::Lose,
        );
        assert_eq!(calculate(&metric).unwrap(), report);
    }

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.857).abs() < 0.001);
    }

    #[rstest]
    #[case(10.0, BmiCategory::Underweight)]
    #[case(18.4, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::NormalWeight)]
    #[case(24.9, BmiCategory::NormalWeight)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.9, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(45.0, BmiCategory::Obese)]
    fn test_bmi_category_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[rstest]
    #[case(74.0, BmiCategory::NormalWeight)]
    #[case(100.0, BmiCategory::Overweight)]
    #[case(120.0, BmiCategory::Obese)]
    fn test_report_category_at_exact_boundary(#[case] weight_kg: f64, #[case] expected: BmiCategory) {
        // 200 cm makes BMI = weight / 4
        let input = metric_input(
            weight_kg,
            200.0,
            40,
            BiologicalSex::Female,
            ActivityLevel::Light,
            Goal::Maintain,
        );
        assert_eq!(calculate(&input).unwrap().bmi_category, expected);
    }

    #[test]
    fn test_category_follows_reported_bmi() {
        // Raw BMI 18.46 is reported as 18.5 and labelled to match
        let weight_kg = 18.46 * 4.0;
        let input = metric_input(
            weight_kg,
            200.0,
            40,
            BiologicalSex::Male,
            ActivityLevel::Light,
            Goal::Maintain,
        );
        let report = calculate(&input).unwrap();
        assert_eq!(report.bmi, 18.5);
        assert_eq!(report.bmi_category, BmiCategory::NormalWeight);
    }

    #[test]
    fn test_bmi_category_ranges_are_contiguous() {
        let categories = [
            BmiCategory::Underweight,
            BmiCategory::NormalWeight,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ];
        for pair in categories.windows(2) {
            assert_eq!(pair[0].range().1, pair[1].range().0);
        }
    }

    #[test]
    fn test_ideal_weight_range() {
        assert_eq!(ideal_weight_range_kg(175.0), IdealWeightRange { min: 57, max: 76 });
    }

    #[test]
    fn test_ideal_range_collapses_below_forty_cm() {
        // Both bounds round to the same whole kilogram
        assert_eq!(ideal_weight_range_kg(20.0), IdealWeightRange { min: 1, max: 1 });
        assert!(ideal_weight_range_kg(40.0).min < ideal_weight_range_kg(40.0).max);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI is always positive for valid inputs
        #[test]
        fn prop_bmi_positive(weight in 0.5f64..500.0, height in 30.0f64..250.0) {
            prop_assert!(calculate_bmi(weight, height) > 0.0);
        }

        /// Property: Reported category agrees with the documented thresholds
        #[test]
        fn prop_category_matches_thresholds(
            weight in 20.0f64..300.0,
            height in 120.0f64..220.0,
            age in 1i32..100,
            sex in sex_strategy()
        ) {
            let input = metric_input(weight, height, age, sex, ActivityLevel::Moderate, Goal::Maintain);
            let report = calculate(&input).unwrap();
            let (low, high) = report.bmi_category.range();
            prop_assert!(report.bmi >= low && report.bmi < high,
                "BMI {} outside {:?} range {}..{}", report.bmi, report.bmi_category, low, high);
        }

        /// Property: Ideal range is a proper interval
        #[test]
        fn prop_ideal_range_ordered(height in 40.0f64..300.0) {
            let range = ideal_weight_range_kg(height);
            prop_assert!(range.min < range.max, "{:?} for height {}", range, height);
        }
    }

    // =========================================================================
    // BMR / Calorie Tests
    // =========================================================================

    #[test]
    fn test_bmr_harris_benedict() {
        let male = calculate_bmr_harris_benedict(70.0, 175.0, 30, BiologicalSex::Male);
        assert!((male - 1695.667).abs() < 1e-6);

        let female = calculate_bmr_harris_benedict(60.0, 165.0, 30, BiologicalSex::Female);
        // 447.593 + 554.82 + 511.17 - 129.9
        assert!((female - 1383.683).abs() < 1e-6);
    }

    #[rstest]
    #[case(ActivityLevel::Sedentary, 1.2)]
    #[case(ActivityLevel::Light, 1.375)]
    #[case(ActivityLevel::Moderate, 1.55)]
    #[case(ActivityLevel::Active, 1.725)]
    #[case(ActivityLevel::VeryActive, 1.9)]
    fn test_activity_multipliers(#[case] level: ActivityLevel, #[case] multiplier: f64) {
        assert_eq!(level.multiplier(), multiplier);
    }

    #[test]
    fn test_goal_offset_is_flat() {
        assert_eq!(calculate_daily_calories(2000.0, ActivityLevel::Sedentary, Goal::Maintain), 2400);
        assert_eq!(calculate_daily_calories(2000.0, ActivityLevel::Sedentary, Goal::Lose), 1900);
        assert_eq!(calculate_daily_calories(2000.0, ActivityLevel::Sedentary, Goal::Gain), 2900);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: maintain is round(BMR × multiplier); lose and gain shift it by exactly 500
        #[test]
        fn prop_goal_adjustment(
            weight in 30.0f64..200.0,
            height in 130.0f64..210.0,
            age in 15i32..90,
            sex in sex_strategy(),
            activity in activity_strategy()
        ) {
            let base = metric_input(weight, height, age, sex, activity, Goal::Maintain);
            let maintain = calculate(&base).unwrap();
            let lose = calculate(&FitnessInput { goal: Goal::Lose, ..base }).unwrap();
            let gain = calculate(&FitnessInput { goal: Goal::Gain, ..base }).unwrap();

            prop_assert_eq!(maintain.daily_calories, (maintain.bmr * activity.multiplier()).round() as i32);
            prop_assert_eq!(lose.daily_calories, maintain.daily_calories - 500);
            prop_assert_eq!(gain.daily_calories, maintain.daily_calories + 500);
            prop_assert_eq!(lose.bmr, maintain.bmr);
        }
    }

    // =========================================================================
    // Macro Tests
    // =========================================================================

    #[test]
    fn test_macro_ratio_tables() {
        assert_eq!(Goal::Lose.macro_ratios(), MacroRatios { protein: 0.40, carbs: 0.35, fats: 0.25 });
        assert_eq!(Goal::Gain.macro_ratios(), Goal::Maintain.macro_ratios());
    }

    #[test]
    fn test_macros_use_adjusted_calories() {
        let macros = calculate_macros(2000, Goal::Lose);
        assert_eq!(macros, Macros { protein_g: 200, carbs_g: 175, fats_g: 56 });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Macro energy stays within the rounding error of the target
        ///
        /// Each gram count is off by at most half a gram: 0.5×4 + 0.5×4 + 0.5×9 kcal.
        #[test]
        fn prop_macros_sum_to_calories(calories in 800i32..6000, goal in goal_strategy()) {
            let macros = calculate_macros(calories, goal);
            let diff = (macros.total_kcal() - calories as f64).abs();
            prop_assert!(diff <= 8.5, "{:?} = {} kcal vs {}", macros, macros.total_kcal(), calories);
        }
    }

    // =========================================================================
    // Water / Body Fat Tests
    // =========================================================================

    #[test]
    fn test_water_intake() {
        assert_eq!(calculate_water_intake_liters(70.0), 2.31);
        assert_eq!(calculate_water_intake_liters(100.0), 3.3);
    }

    #[test]
    fn test_body_fat_estimate() {
        assert_eq!(estimate_body_fat(22.9, 30, BiologicalSex::Male), 18.2);
        assert_eq!(estimate_body_fat(22.9, 30, BiologicalSex::Female), 29.0);
    }

    #[test]
    fn test_negative_body_fat_is_reported_not_clamped() {
        // BMI 8.3 at 18 years old
        let input = metric_input(
            30.0,
            190.0,
            18,
            BiologicalSex::Male,
            ActivityLevel::Moderate,
            Goal::Maintain,
        );
        let report = calculate(&input).unwrap();
        assert_eq!(report.bmi, 8.3);
        assert_eq!(report.body_fat_percent, -2.1);
        assert!(report.warnings.contains(&ReportWarning::NegativeBodyFatEstimate));
    }

    #[test]
    fn test_low_calorie_target_is_flagged() {
        let input = metric_input(
            45.0,
            150.0,
            60,
            BiologicalSex::Female,
            ActivityLevel::Sedentary,
            Goal::Lose,
        );
        let report = calculate(&input).unwrap();
        assert_eq!(report.daily_calories, 783);
        assert_eq!(report.warnings, vec![ReportWarning::CaloriesBelowMinimum]);
    }

    #[test]
    fn test_daily_calories_saturate_at_extremes() {
        assert_eq!(
            calculate_daily_calories(f64::MAX, ActivityLevel::VeryActive, Goal::Gain),
            i32::MAX
        );
        assert_eq!(
            calculate_daily_calories(-f64::MAX, ActivityLevel::Sedentary, Goal::Lose),
            i32::MIN
        );
    }

    #[test]
    fn test_huge_weight_does_not_overflow() {
        let input = metric_input(
            1.0e9,
            175.0,
            30,
            BiologicalSex::Male,
            ActivityLevel::Moderate,
            Goal::Gain,
        );
        let report = calculate(&input).unwrap();
        assert_eq!(report.daily_calories, i32::MAX);
        assert!(report.macros.protein_g > 0);
        assert!(report.macros.fats_g > 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Extreme but finite input still yields a report
        #[test]
        fn prop_extreme_magnitudes_never_overflow(
            weight in 1.0e6f64..1.0e300,
            age in 1i32..=i32::MAX,
            goal in goal_strategy(),
            activity in activity_strategy(),
        ) {
            let input = metric_input(weight, 175.0, age, BiologicalSex::Female, activity, goal);
            let report = calculate(&input);
            prop_assert!(report.is_ok());
        }
    }

    // =========================================================================
    // Validation / Orchestration Tests
    // =========================================================================

    #[rstest]
    #[case(0.0, 175.0, 30, "weight")]
    #[case(-70.0, 175.0, 30, "weight")]
    #[case(f64::NAN, 175.0, 30, "weight")]
    #[case(70.0, 0.0, 30, "height")]
    #[case(70.0, f64::INFINITY, 30, "height")]
    #[case(70.0, 175.0, 0, "age")]
    #[case(-1.0, -1.0, -1, "weight")]
    fn test_invalid_input_names_first_field(
        #[case] weight: f64,
        #[case] height: f64,
        #[case] age: i32,
        #[case] field: &str,
    ) {
        let input = metric_input(weight, height, age, BiologicalSex::Male, ActivityLevel::Light, Goal::Gain);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field, field);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("veryActive".parse::<ActivityLevel>().unwrap(), ActivityLevel::VeryActive);
        assert_eq!("very_active".parse::<ActivityLevel>().unwrap(), ActivityLevel::VeryActive);
        assert_eq!("Moderate".parse::<ActivityLevel>().unwrap(), ActivityLevel::Moderate);
        assert!("couch".parse::<ActivityLevel>().is_err());

        assert_eq!("FEMALE".parse::<BiologicalSex>().unwrap(), BiologicalSex::Female);
        assert!("other".parse::<BiologicalSex>().is_err());

        assert_eq!("gain".parse::<Goal>().unwrap(), Goal::Gain);
        assert!("bulk".parse::<Goal>().is_err());
    }

    #[test]
    fn test_report_serializes_snake_case() {
        let input = metric_input(
            70.0,
            175.0,
            30,
            BiologicalSex::Male,
            ActivityLevel::Moderate,
            Goal::Maintain,
        );
        let json = serde_json::to_value(calculate(&input).unwrap()).unwrap();
        assert_eq!(json["bmi_category"], "normal_weight");
        assert_eq!(json["ideal_weight_range_kg"]["min"], 57);
        assert_eq!(json["macros"]["protein_g"], 197);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Same input, bit-identical report
        #[test]
        fn prop_calculate_idempotent(
            weight in 20.0f64..300.0,
            height in 100.0f64..230.0,
            age in 1i32..110,
            sex in sex_strategy(),
            activity in activity_strategy(),
            goal in goal_strategy()
        ) {
            let input = metric_input(weight, height, age, sex, activity, goal);
            let first = calculate(&input).unwrap();
            let second = calculate(&input).unwrap();
            prop_assert_eq!(first.bmi.to_bits(), second.bmi.to_bits());
            prop_assert_eq!(first.body_fat_percent.to_bits(), second.body_fat_percent.to_bits());
            prop_assert_eq!(first, second);
        }
    }
}
