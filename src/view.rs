use crate::app::Message;

pub trait View {
    fn update(&mut self, message: Message) -> Option<Message>;

    /// Renders the current frame as text.
    fn view(&self) -> String;
}
