pub mod char_field;
pub mod choice_field;
pub mod model_choice_field;

pub use char_field::CharField;
pub use choice_field::{ChoiceField, MultipleChoiceField, choices};
pub use model_choice_field::{ModelChoiceField, ModelMultipleChoiceField};
