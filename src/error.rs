use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Мост с хостом недоступен: {0}")]
    Bridge(String),
}

pub type Result<T> = std::result::Result<T, DockError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! dock_error {
    (bridge, $($arg:tt)*) => {
        $crate::error::DockError::Bridge(format!($($arg)*))
    };
}
