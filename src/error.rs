//! Application error boundary
//!
//! [`AppError`] gathers the per-area error enums. Screens never show the
//! detailed error: [`user_message`] logs it and hands back the generic,
//! localized message for the screen the user was on.

use crate::api::{ClientError, SessionError};
use crate::config::ConfigError;
use crate::import::{ImportError, NormalizeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Import(#[from] ImportError),

    /// A single hand-entered expense did not normalize
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Where the user was when the error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Expenses,
    CreateExpense,
    DeleteExpense,
    Import,
    Users,
    DeleteUser,
    Residents,
    ShopOwners,
    Notifications,
    Dashboard,
}

/// Log the full diagnostic and return the message to show on `screen`
pub fn user_message(screen: Screen, err: &AppError) -> &'static str {
    tracing::error!(?screen, error = %err, detail = ?err, "Operation failed");

    match err {
        AppError::Config(_) => return "Erro ao carregar configuração.",
        AppError::Session(_) => return "Erro ao acessar a sessão salva.",
        AppError::Client(ClientError::AdminOnly) => {
            return "Acesso restrito a administradores."
        }
        AppError::Client(ClientError::NotAuthenticated)
            if !matches!(screen, Screen::Login | Screen::Register) =>
        {
            return "Sessão expirada. Faça login novamente."
        }
        _ => {}
    }

    match screen {
        Screen::Login => "Usuário ou senha inválidos.",
        Screen::Register => match err {
            AppError::Client(ClientError::PasswordMismatch) => "As senhas não coincidem.",
            _ => "Erro ao criar conta. Por favor, tente novamente.",
        },
        Screen::Expenses => "Erro ao buscar despesas.",
        Screen::CreateExpense => "Erro ao criar despesa.",
        Screen::DeleteExpense => "Erro ao deletar despesa.",
        Screen::Import => "Erro ao processar CSV. Verifique o formato das datas e valores.",
        Screen::Users => "Erro ao buscar usuários.",
        Screen::DeleteUser => "Erro ao deletar usuário.",
        Screen::Residents => "Erro ao buscar residências.",
        Screen::ShopOwners => "Erro ao buscar lojas.",
        Screen::Notifications => "Erro ao buscar notificações.",
        Screen::Dashboard => "Erro ao carregar o painel.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_messages() {
        let err = AppError::from(ClientError::Unavailable);
        assert_eq!(user_message(Screen::Expenses, &err), "Erro ao buscar despesas.");
        assert_eq!(user_message(Screen::ShopOwners, &err), "Erro ao buscar lojas.");
        assert_eq!(user_message(Screen::Login, &err), "Usuário ou senha inválidos.");
    }

    #[test]
    fn test_import_message_hides_detail() {
        let err = AppError::from(ImportError::InvalidAmount {
            row: 3,
            value: "abc".to_string(),
        });
        let message = user_message(Screen::Import, &err);
        assert_eq!(
            message,
            "Erro ao processar CSV. Verifique o formato das datas e valores."
        );
        assert!(!message.contains("abc"));
    }

    #[test]
    fn test_register_messages() {
        let mismatch = AppError::from(ClientError::PasswordMismatch);
        assert_eq!(user_message(Screen::Register, &mismatch), "As senhas não coincidem.");

        let conflict = AppError::from(ClientError::Status {
            status: 409,
            message: "taken".to_string(),
        });
        assert_eq!(
            user_message(Screen::Register, &conflict),
            "Erro ao criar conta. Por favor, tente novamente."
        );
    }

    #[test]
    fn test_admin_only_message() {
        let err = AppError::from(ClientError::AdminOnly);
        assert_eq!(
            user_message(Screen::Users, &err),
            "Acesso restrito a administradores."
        );
        assert_eq!(
            user_message(Screen::ShopOwners, &err),
            "Acesso restrito a administradores."
        );
    }

    #[test]
    fn test_signed_out_message() {
        let err = AppError::from(ClientError::NotAuthenticated);
        assert_eq!(
            user_message(Screen::Dashboard, &err),
            "Sessão expirada. Faça login novamente."
        );
        assert_eq!(user_message(Screen::Login, &err), "Usuário ou senha inválidos.");
    }
}
