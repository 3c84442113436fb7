//! CSS selector catalog for the robot order form.
//!
//! Kept in one place so a site change touches a single module.

/// OK button on the modal that blocks the form on first load
pub const MODAL_OK_BUTTON: &str = ".modal button.btn-dark";

/// Head part dropdown
pub const HEAD_DROPDOWN: &str = "#head";

/// Legs part number input (the only number input on the form)
pub const LEGS_INPUT: &str = "input[type='number']";

/// Shipping address input
pub const ADDRESS_INPUT: &str = "#address";

/// Preview button
pub const PREVIEW_BUTTON: &str = "#preview";

/// Order (submit) button
pub const ORDER_BUTTON: &str = "#order";

/// "Order another robot" button, shown once the receipt is up
pub const ORDER_ANOTHER_BUTTON: &str = "#order-another";

/// Server-side rejection banner
pub const ERROR_BANNER: &str = ".alert.alert-danger";

/// Receipt fragment rendered after a successful order
pub const RECEIPT: &str = "#receipt";

/// Preview image of the configured robot
pub const PREVIEW_IMAGE: &str = "#robot-preview-image";

/// Radio button for the body part, selected by its value attribute
pub fn body_radio(value: &str) -> String {
    format!("input[type='radio'][name='body'][value='{}']", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_radio_embeds_value() {
        assert_eq!(
            body_radio("2"),
            "input[type='radio'][name='body'][value='2']"
        );
    }
}
