//! Prediction form state.
//!
//! The form is a flat list of typed fields navigated like a settings
//! panel: numeric fields are edited as digit buffers and clamped to their
//! declared range on every edit, choice fields cycle through a fixed set
//! of values, and toggle fields flip between yes and no. Submission reads
//! the already-sanitized values, so every numeric field is finite by
//! construction.

use crate::api::types::PredictionRequest;

/// Longest accepted numeric buffer. Generous enough for every declared
/// range while keeping parses trivially in-bounds.
const MAX_NUMERIC_LEN: usize = 10;

/// Input kind of a form field, with the declared range for numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Whole-number field clamped to `min..=max`.
    Integer { min: i64, max: i64 },
    /// Decimal field clamped to `min..=max`.
    Decimal { min: f64, max: f64 },
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
    /// Yes/No flag.
    Toggle,
}

/// Identifiers for the prediction form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Age,
    Gender,
    Bmi,
    Smoker,
    Diabetes,
    Hypertension,
    HeartDisease,
    Asthma,
    ActivityLevel,
    DailySteps,
    SleepHours,
    StressLevel,
    DoctorVisits,
    HospitalAdmissions,
    MedicationCount,
    InsuranceType,
    CoveragePct,
    CityType,
    PreviousYearCost,
}

impl FormField {
    /// Returns all fields in display order.
    #[must_use]
    pub fn all() -> &'static [FormField] {
        &[
            Self::Age,
            Self::Gender,
            Self::Bmi,
            Self::Smoker,
            Self::Diabetes,
            Self::Hypertension,
            Self::HeartDisease,
            Self::Asthma,
            Self::ActivityLevel,
            Self::DailySteps,
            Self::SleepHours,
            Self::StressLevel,
            Self::DoctorVisits,
            Self::HospitalAdmissions,
            Self::MedicationCount,
            Self::InsuranceType,
            Self::CoveragePct,
            Self::CityType,
            Self::PreviousYearCost,
        ]
    }

    /// Returns the display label for this field.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Bmi => "BMI",
            Self::Smoker => "Smoker",
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::HeartDisease => "Heart disease",
            Self::Asthma => "Asthma",
            Self::ActivityLevel => "Activity level",
            Self::DailySteps => "Daily steps",
            Self::SleepHours => "Sleep hours",
            Self::StressLevel => "Stress level (1-10)",
            Self::DoctorVisits => "Doctor visits / year",
            Self::HospitalAdmissions => "Hospital admissions",
            Self::MedicationCount => "Daily medications",
            Self::InsuranceType => "Insurance type",
            Self::CoveragePct => "Coverage %",
            Self::CityType => "City type",
            Self::PreviousYearCost => "Previous year cost",
        }
    }

    /// Returns the input kind (and declared range) for this field.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Age => FieldKind::Integer { min: 0, max: 120 },
            Self::Gender => FieldKind::Choice(&["Male", "Female"]),
            Self::Bmi => FieldKind::Decimal { min: 0.0, max: 60.0 },
            Self::Smoker
            | Self::Diabetes
            | Self::Hypertension
            | Self::HeartDisease
            | Self::Asthma => FieldKind::Toggle,
            Self::ActivityLevel => FieldKind::Choice(&["Low", "Medium", "High"]),
            Self::DailySteps => FieldKind::Integer { min: 0, max: 50_000 },
            Self::SleepHours => FieldKind::Decimal { min: 0.0, max: 24.0 },
            Self::StressLevel => FieldKind::Integer { min: 1, max: 10 },
            Self::DoctorVisits => FieldKind::Integer { min: 0, max: 100 },
            Self::HospitalAdmissions => FieldKind::Integer { min: 0, max: 20 },
            Self::MedicationCount => FieldKind::Integer { min: 0, max: 50 },
            Self::InsuranceType => FieldKind::Choice(&["Private", "Government", "None"]),
            Self::CoveragePct => FieldKind::Integer { min: 0, max: 100 },
            Self::CityType => FieldKind::Choice(&["Urban", "Semi-Urban", "Rural"]),
            Self::PreviousYearCost => FieldKind::Decimal {
                min: 0.0,
                max: 10_000_000.0,
            },
        }
    }

    /// Returns the default buffer / selection for this field.
    fn default_value(&self) -> FieldValue {
        match self {
            Self::Age => FieldValue::Number("30".to_string()),
            Self::Bmi => FieldValue::Number("25".to_string()),
            Self::DailySteps => FieldValue::Number("5000".to_string()),
            Self::SleepHours => FieldValue::Number("7".to_string()),
            Self::StressLevel => FieldValue::Number("5".to_string()),
            Self::DoctorVisits => FieldValue::Number("2".to_string()),
            Self::HospitalAdmissions | Self::MedicationCount => {
                FieldValue::Number("0".to_string())
            }
            Self::CoveragePct => FieldValue::Number("50".to_string()),
            Self::PreviousYearCost => FieldValue::Number("5000".to_string()),
            Self::Gender | Self::CityType => FieldValue::Choice(0),
            Self::ActivityLevel | Self::InsuranceType => FieldValue::Choice(1),
            Self::Smoker
            | Self::Diabetes
            | Self::Hypertension
            | Self::HeartDisease
            | Self::Asthma => FieldValue::Toggle(false),
        }
    }
}

/// Current value of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Digit buffer for numeric fields.
    Number(String),
    /// Index into the field's choice list.
    Choice(usize),
    /// Yes/No flag.
    Toggle(bool),
}

/// State of the prediction form: one value per field plus the selection
/// cursor.
#[derive(Debug, Clone)]
pub struct PredictionForm {
    /// Index of the selected field in [`FormField::all`] order.
    pub selected: usize,
    values: Vec<FieldValue>,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionForm {
    /// Creates a form pre-filled with the backend's documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected: 0,
            values: FormField::all().iter().map(FormField::default_value).collect(),
        }
    }

    /// Returns the currently selected field.
    #[must_use]
    pub fn selected_field(&self) -> FormField {
        FormField::all()[self.selected.min(FormField::all().len() - 1)]
    }

    /// Moves the selection cursor up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the selection cursor down.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(FormField::all().len() - 1);
    }

    fn index_of(field: FormField) -> usize {
        FormField::all()
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0)
    }

    /// Returns the value of the given field.
    #[must_use]
    pub fn value(&self, field: FormField) -> &FieldValue {
        &self.values[Self::index_of(field)]
    }

    /// Inserts a character into the selected field's numeric buffer.
    ///
    /// Non-numeric fields and characters the field kind does not accept
    /// are ignored. The buffer is clamped to the field's declared range
    /// after every accepted edit.
    pub fn input_char(&mut self, c: char) {
        let field = self.selected_field();
        let kind = field.kind();
        let FieldValue::Number(buffer) = &mut self.values[self.selected] else {
            return;
        };

        let accepted = match kind {
            FieldKind::Integer { .. } => c.is_ascii_digit(),
            FieldKind::Decimal { .. } => {
                c.is_ascii_digit() || (c == '.' && !buffer.contains('.'))
            }
            FieldKind::Choice(_) | FieldKind::Toggle => false,
        };
        if !accepted || buffer.len() >= MAX_NUMERIC_LEN {
            return;
        }

        buffer.push(c);
        sanitize_numeric(buffer, kind);
    }

    /// Deletes the last character of the selected field's numeric buffer.
    pub fn backspace(&mut self) {
        if let FieldValue::Number(buffer) = &mut self.values[self.selected] {
            buffer.pop();
        }
    }

    /// Cycles the selected choice field forward, or flips a toggle.
    pub fn cycle_next(&mut self) {
        let kind = self.selected_field().kind();
        match (&mut self.values[self.selected], kind) {
            (FieldValue::Choice(index), FieldKind::Choice(options)) => {
                *index = (*index + 1) % options.len();
            }
            (FieldValue::Toggle(on), FieldKind::Toggle) => *on = !*on,
            _ => {}
        }
    }

    /// Cycles the selected choice field backward, or flips a toggle.
    pub fn cycle_prev(&mut self) {
        let kind = self.selected_field().kind();
        match (&mut self.values[self.selected], kind) {
            (FieldValue::Choice(index), FieldKind::Choice(options)) => {
                *index = (*index + options.len() - 1) % options.len();
            }
            (FieldValue::Toggle(on), FieldKind::Toggle) => *on = !*on,
            _ => {}
        }
    }

    /// Returns the display string for a field's current value.
    #[must_use]
    pub fn display_value(&self, field: FormField) -> String {
        match (self.value(field), field.kind()) {
            (FieldValue::Number(buffer), _) => buffer.clone(),
            (FieldValue::Choice(index), FieldKind::Choice(options)) => {
                (*options.get(*index).unwrap_or(&options[0])).to_string()
            }
            (FieldValue::Toggle(on), _) => if *on { "Yes" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }

    /// Parses an integer field, falling back to the declared minimum for
    /// an empty or unfinished buffer.
    fn int_value(&self, field: FormField) -> i64 {
        let FieldKind::Integer { min, max } = field.kind() else {
            return 0;
        };
        match self.value(field) {
            FieldValue::Number(buffer) => {
                buffer.parse::<i64>().map_or(min, |v| v.clamp(min, max))
            }
            _ => min,
        }
    }

    /// Parses a decimal field, falling back to the declared minimum.
    fn decimal_value(&self, field: FormField) -> f64 {
        let FieldKind::Decimal { min, max } = field.kind() else {
            return 0.0;
        };
        match self.value(field) {
            FieldValue::Number(buffer) => {
                buffer.parse::<f64>().map_or(min, |v| v.clamp(min, max))
            }
            _ => min,
        }
    }

    fn choice_name(&self, field: FormField) -> String {
        self.display_value(field)
    }

    fn flag(&self, field: FormField) -> u8 {
        match self.value(field) {
            FieldValue::Toggle(true) => 1,
            _ => 0,
        }
    }

    /// Assembles the wire request from the current (sanitized) values.
    ///
    /// `user_email` is attached only when a session exists; callers pass
    /// the session's email, if any.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Ranges are declared well inside u32
    pub fn build_request(&self, user_email: Option<String>) -> PredictionRequest {
        let smoker = match self.value(FormField::Smoker) {
            FieldValue::Toggle(true) => "Yes",
            _ => "No",
        };

        PredictionRequest {
            age: self.int_value(FormField::Age) as u32,
            gender: self.choice_name(FormField::Gender),
            bmi: self.decimal_value(FormField::Bmi),
            smoker: smoker.to_string(),
            diabetes: self.flag(FormField::Diabetes),
            hypertension: self.flag(FormField::Hypertension),
            heart_disease: self.flag(FormField::HeartDisease),
            asthma: self.flag(FormField::Asthma),
            physical_activity_level: self.choice_name(FormField::ActivityLevel),
            daily_steps: self.int_value(FormField::DailySteps) as u32,
            sleep_hours: self.decimal_value(FormField::SleepHours),
            stress_level: self.int_value(FormField::StressLevel) as u32,
            doctor_visits_per_year: self.int_value(FormField::DoctorVisits) as u32,
            hospital_admissions: self.int_value(FormField::HospitalAdmissions) as u32,
            medication_count: self.int_value(FormField::MedicationCount) as u32,
            insurance_type: self.choice_name(FormField::InsuranceType),
            insurance_coverage_pct: self.int_value(FormField::CoveragePct) as u32,
            city_type: self.choice_name(FormField::CityType),
            previous_year_cost: self.decimal_value(FormField::PreviousYearCost),
            user_email,
        }
    }
}

/// Clamps a numeric buffer to the field's declared range in place.
///
/// The buffer is rewritten only when the parsed value actually falls
/// outside the range, so partial entries like `""` or `"3."` survive
/// further typing.
fn sanitize_numeric(buffer: &mut String, kind: FieldKind) {
    match kind {
        FieldKind::Integer { min, max } => {
            if let Ok(value) = buffer.parse::<i64>() {
                let clamped = value.clamp(min, max);
                if clamped != value {
                    *buffer = clamped.to_string();
                }
            }
        }
        FieldKind::Decimal { min, max } => {
            if let Ok(value) = buffer.parse::<f64>() {
                let clamped = value.clamp(min, max);
                if (clamped - value).abs() > f64::EPSILON {
                    *buffer = clamped.to_string();
                }
            }
        }
        FieldKind::Choice(_) | FieldKind::Toggle => {}
    }
}
