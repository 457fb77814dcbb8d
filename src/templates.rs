//! Minijinja template engine configuration with embedded, auto-reload and compiled-in modes.

use axum_template::engine::Engine;

use crate::errors::HttpError;
use crate::http::context::AppEngine;

#[cfg(feature = "reload")]
use minijinja_autoreload::AutoReloader;

#[cfg(not(feature = "reload"))]
use minijinja::Environment;

#[cfg(feature = "reload")]
/// Build template environment with auto-reloading for development
pub fn build_env(templates_path: &str, external_base: &str, version: &str) -> AutoReloader {
    reload_env::build_env(
        templates_path.to_string(),
        external_base.to_string(),
        version.to_string(),
    )
}

#[cfg(feature = "embed")]
/// Build template environment with embedded templates for production
pub fn build_env(
    _templates_path: &str,
    external_base: &str,
    version: &str,
) -> Result<Environment<'static>, HttpError> {
    Ok(embed_env::build_env(
        external_base.to_string(),
        version.to_string(),
    ))
}

#[cfg(not(any(feature = "reload", feature = "embed")))]
/// Build template environment from the templates compiled into the binary
pub fn build_env(
    _templates_path: &str,
    external_base: &str,
    version: &str,
) -> Result<Environment<'static>, HttpError> {
    static_env::build_env(external_base.to_string(), version.to_string())
        .map_err(|e| HttpError::TemplateSetupFailed(e.to_string()))
}

/// Wrap the feature-selected environment in the engine handlers render through
pub fn build_engine(
    templates_path: &str,
    external_base: &str,
    version: &str,
) -> Result<AppEngine, HttpError> {
    #[cfg(feature = "reload")]
    let env = build_env(templates_path, external_base, version);

    #[cfg(not(feature = "reload"))]
    let env = build_env(templates_path, external_base, version)?;

    Ok(Engine::new(env))
}

#[cfg(feature = "reload")]
mod reload_env {
    use minijinja::{Environment, path_loader};
    use minijinja_autoreload::AutoReloader;

    pub fn build_env(templates_path: String, external_base: String, version: String) -> AutoReloader {
        AutoReloader::new(move |notifier| {
            let mut env = Environment::new();
            env.set_trim_blocks(true);
            env.set_lstrip_blocks(true);
            env.add_global("base", external_base.clone());
            env.add_global("version", version.clone());
            env.set_loader(path_loader(&templates_path));
            notifier.set_fast_reload(true);
            notifier.watch_path(&templates_path, true);
            Ok(env)
        })
    }
}

#[cfg(feature = "embed")]
mod embed_env {
    use minijinja::Environment;

    pub fn build_env(external_base: String, version: String) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_global("base", external_base);
        env.add_global("version", version);
        minijinja_embed::load_templates!(&mut env);
        env
    }
}

#[cfg(not(any(feature = "reload", feature = "embed")))]
mod static_env {
    use minijinja::Environment;

    pub fn build_env(
        external_base: String,
        version: String,
    ) -> Result<Environment<'static>, minijinja::Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_global("base", external_base);
        env.add_global("version", version);
        env.add_template("base.html", include_str!("../templates/base.html"))?;
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template("approve.html", include_str!("../templates/approve.html"))?;
        env.add_template("error.html", include_str!("../templates/error.html"))?;
        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::auth_server::{ApproveView, RequestError, ViewDirective};
    use crate::oauth::types::Client;
    use minijinja::context;

    const TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

    fn render(name: &str, ctx: minijinja::Value) -> String {
        #[cfg(feature = "reload")]
        {
            let reloader = build_env(TEMPLATES, "http://localhost:9001", "test");
            let env = reloader.acquire_env().unwrap();
            env.get_template(name).unwrap().render(ctx).unwrap()
        }

        #[cfg(not(feature = "reload"))]
        {
            let env = build_env(TEMPLATES, "http://localhost:9001", "test").unwrap();
            env.get_template(name).unwrap().render(ctx).unwrap()
        }
    }

    #[test]
    fn test_approve_template_carries_reqid() {
        let view = ViewDirective::Approve(ApproveView {
            client: Client {
                client_id: "client-abc".to_string(),
                client_secret: "secret-xyz".to_string(),
                redirect_uris: vec!["https://app.example.com/callback".to_string()],
            },
            reqid: "req-123".to_string(),
        });

        let html = render(&view.template(), minijinja::Value::from_serialize(&view));

        assert!(html.contains("client-abc"));
        assert!(html.contains(r#"name="reqid" value="req-123""#));
        assert!(html.contains(r#"method="post""#));
        assert!(!html.contains("secret-xyz"));
    }

    #[test]
    fn test_error_template_shows_message() {
        let view = ViewDirective::error(RequestError::UnknownClient);
        let html = render(&view.template(), minijinja::Value::from_serialize(&view));
        assert!(html.contains("Unknown client"));
    }

    #[test]
    fn test_index_template_lists_clients() {
        let html = render(
            "index.html",
            context! {
                clients => vec![Client {
                    client_id: "listed-client".to_string(),
                    client_secret: "secret-listed".to_string(),
                    redirect_uris: vec!["https://app.example.com/callback".to_string()],
                }],
            },
        );
        assert!(html.contains("listed-client"));
        assert!(html.contains("app.example.com"));
        assert!(!html.contains("secret-listed"));
    }
}
