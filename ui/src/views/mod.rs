mod home;
pub use home::Home;

mod practice;
pub use practice::Practice;

mod phonemes;
pub use phonemes::Phonemes;

mod progress;
pub use progress::Progress;
