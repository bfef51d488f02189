use std::fmt;

type ValueHandler = Box<dyn FnMut(&str) + Send>;
type CancelHandler = Box<dyn FnMut() + Send>;

/// Initial settings of a [`ConfirmDialog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialogConfig {
    pub title: String,
    pub message: String,
    pub details: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub visible: bool,
    /// Show a single free-text field under the message.
    pub show_input: bool,
    pub input_placeholder: String,
    pub input_value: String,
    /// Reject confirmation while the trimmed input is empty. Only applies
    /// when `show_input` is set.
    pub input_required: bool,
    pub input_error_message: String,
}

impl Default for ConfirmDialogConfig {
    fn default() -> Self {
        Self {
            title: "Confirmation".to_string(),
            message: "Are you sure you want to continue?".to_string(),
            details: String::new(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            visible: false,
            show_input: false,
            input_placeholder: String::new(),
            input_value: String::new(),
            input_required: false,
            input_error_message: "This field is required".to_string(),
        }
    }
}

/// Result of [`ConfirmDialog::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The confirm handler fired with this value and the dialog closed.
    Confirmed(String),
    /// Required input was blank; the dialog stays open with an error.
    Rejected,
}

/// Yes/no confirmation with an optional text input.
///
/// The dialog is either open (`visible`) or closed. Only a successful
/// [`confirm`](Self::confirm) or a [`cancel`](Self::cancel) closes it; only the
/// owner reopens it.
pub struct ConfirmDialog {
    config: ConfirmDialogConfig,
    visible: bool,
    input_value: String,
    input_valid: bool,
    on_confirm: Option<ValueHandler>,
    on_cancel: Option<CancelHandler>,
    on_input_change: Option<ValueHandler>,
}

impl ConfirmDialog {
    pub fn new(config: ConfirmDialogConfig) -> Self {
        Self {
            visible: config.visible,
            input_value: config.input_value.clone(),
            input_valid: true,
            config,
            on_confirm: None,
            on_cancel: None,
            on_input_change: None,
        }
    }

    pub fn on_confirm<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_confirm = Some(Box::new(handler));
        self
    }

    pub fn on_cancel<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_cancel = Some(Box::new(handler));
        self
    }

    /// Called with the new value whenever the input changes, including the
    /// clear that follows confirm and cancel.
    pub fn on_input_change<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_input_change = Some(Box::new(handler));
        self
    }

    pub fn config(&self) -> &ConfirmDialogConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn message(&self) -> &str {
        &self.config.message
    }

    pub fn details(&self) -> &str {
        &self.config.details
    }

    pub fn confirm_text(&self) -> &str {
        &self.config.confirm_text
    }

    pub fn cancel_text(&self) -> &str {
        &self.config.cancel_text
    }

    pub fn shows_input(&self) -> bool {
        self.config.show_input
    }

    pub fn input_placeholder(&self) -> &str {
        &self.config.input_placeholder
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn is_input_valid(&self) -> bool {
        self.input_valid
    }

    /// Validation message to display, if any.
    pub fn error_message(&self) -> Option<&str> {
        if self.config.show_input && !self.input_valid {
            Some(&self.config.input_error_message)
        } else {
            None
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
        self.notify_input_change();
    }

    pub fn confirm(&mut self) -> ConfirmOutcome {
        if self.config.show_input
            && self.config.input_required
            && self.input_value.trim().is_empty()
        {
            tracing::debug!("Confirmation rejected: required input is blank");
            self.input_valid = false;
            return ConfirmOutcome::Rejected;
        }

        self.input_valid = true;
        let value = std::mem::take(&mut self.input_value);
        if let Some(handler) = self.on_confirm.as_mut() {
            handler(&value);
        }
        self.visible = false;
        self.notify_input_change();

        ConfirmOutcome::Confirmed(value)
    }

    pub fn cancel(&mut self) {
        if let Some(handler) = self.on_cancel.as_mut() {
            handler();
        }
        self.visible = false;
        self.input_value.clear();
        self.input_valid = true;
        self.notify_input_change();
    }

    fn notify_input_change(&mut self) {
        if let Some(handler) = self.on_input_change.as_mut() {
            handler(&self.input_value);
        }
    }
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new(ConfirmDialogConfig::default())
    }
}

impl fmt::Debug for ConfirmDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmDialog")
            .field("config", &self.config)
            .field("visible", &self.visible)
            .field("input_value", &self.input_value)
            .field("input_valid", &self.input_valid)
            .finish_non_exhaustive()
    }
}
