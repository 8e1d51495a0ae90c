use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Browse,
    AddToCart,
    ViewCart,
    Checkout,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    ViewProducts,
    AddToCart,
    ViewCart,
    Checkout,
    Exit,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionTransitionError {
    #[error("invalid menu choice `{0}`")]
    InvalidChoice(String),
    #[error("menu selection is only allowed from the menu, not from {0:?}")]
    NotAtMenu(SessionState),
    #[error("cannot leave {0:?} without a menu selection")]
    NothingToComplete(SessionState),
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] =
        [Self::ViewProducts, Self::AddToCart, Self::ViewCart, Self::Checkout, Self::Exit];

    /// Parses a whole-number selection in `1..=5`; anything else is an invalid choice.
    pub fn parse(input: &str) -> Result<Self, SessionTransitionError> {
        let trimmed = input.trim();
        let invalid = || SessionTransitionError::InvalidChoice(trimmed.to_string());

        let number = trimmed.parse::<u8>().map_err(|_| invalid())?;
        Self::ALL.into_iter().find(|choice| choice.number() == number).ok_or_else(invalid)
    }

    pub fn number(self) -> u8 {
        match self {
            Self::ViewProducts => 1,
            Self::AddToCart => 2,
            Self::ViewCart => 3,
            Self::Checkout => 4,
            Self::Exit => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ViewProducts => "View Products",
            Self::AddToCart => "Add to Cart",
            Self::ViewCart => "View Cart",
            Self::Checkout => "Checkout",
            Self::Exit => "Exit",
        }
    }

    fn target(self) -> SessionState {
        match self {
            Self::ViewProducts => SessionState::Browse,
            Self::AddToCart => SessionState::AddToCart,
            Self::ViewCart => SessionState::ViewCart,
            Self::Checkout => SessionState::Checkout,
            Self::Exit => SessionState::Exit,
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl SessionState {
    pub fn initial() -> Self {
        Self::Menu
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exit)
    }

    pub fn select(self, choice: MenuChoice) -> Result<Self, SessionTransitionError> {
        match self {
            Self::Menu => Ok(choice.target()),
            other => Err(SessionTransitionError::NotAtMenu(other)),
        }
    }

    /// Finishes the current screen and returns to the menu.
    pub fn complete(self) -> Result<Self, SessionTransitionError> {
        match self {
            Self::Browse | Self::AddToCart | Self::ViewCart | Self::Checkout => Ok(Self::Menu),
            other => Err(SessionTransitionError::NothingToComplete(other)),
        }
    }
}
