//! The [`ViewModel`] trait for the MVVM architecture.

use crate::app::Message;

/// Trait containing methods for `ViewModel` modules in the MVVM architecture.
pub trait ViewModel {
    /// Applies a message to the model. Returns a message for the caller when the session changes state.
    fn update(&mut self, message: Message) -> Option<Message>;
}
