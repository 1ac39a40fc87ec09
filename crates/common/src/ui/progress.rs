//! Progress bar

/// Fill level of a progress indicator, kept within [0, 100].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBar {
    container_id: String,
    percentage: f64,
}

impl ProgressBar {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            percentage: 0.0,
        }
    }

    /// Set the fill. Out-of-range and NaN inputs are clamped.
    pub fn update(&mut self, percentage: f64) {
        self.percentage = if percentage.is_nan() {
            0.0
        } else {
            percentage.clamp(0.0, 100.0)
        };
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="progress" id="{}"><div class="progress-bar" style="width: {}%"></div></div>"#,
            super::escape_html(&self.container_id),
            self.percentage
        )
    }
}
