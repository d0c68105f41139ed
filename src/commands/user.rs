//! User command - Advisor account bootstrap.
//!
//! Creates accounts without a session so the first admin can be seeded:
//!
//! ```bash
//! crm-inmobiliario user create --username admin --password 'S3guro!' --rol admin
//! ```

use crate::cli::args::{UserAction, UserArgs};
use crate::config::Config;
use crate::domain::AsesorPatch;
use crate::errors::AppResult;
use crate::services::{NuevoAsesor, ServiceContainer, Services};

/// Execute the user command
pub async fn execute(args: UserArgs, config: Config) -> AppResult<()> {
    match args.action {
        UserAction::Create {
            username,
            password,
            rol,
            nombres,
            apellidos,
        } => {
            let persistence = super::open_backend(config.backend, &config).await?;
            let services = Services::from_persistence(persistence);

            let nuevo = NuevoAsesor {
                username,
                password,
                perfil: AsesorPatch {
                    rol: Some(rol),
                    nombres: Some(nombres),
                    apellidos: Some(apellidos),
                    ..Default::default()
                },
            };
            let username = nuevo.username.clone();
            let id = services.auth().crear_usuario(nuevo).await?;
            println!("Created {} account '{}' with id {}", rol, username, id);
        }
    }

    Ok(())
}
