//! # warden-template
//!
//! Authorization functions for template expression languages.
//!
//! Templates can only pass strings, so this crate is the thin adapter
//! between string-encoded calls and the native
//! [`AuthorizationQueries`](warden_core::AuthorizationQueries):
//!
//! - [`ExpressionFunctions`] splits delimited arguments and dispatches the
//!   fourteen functions by name;
//! - [`register_helpers`] exposes them to Handlebars;
//! - [`TemplateRenderer`] bundles a registry with the helpers installed.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden_core::ThreadSubjectLookup;
//! use warden_template::{ExpressionFunctions, TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new(Arc::new(ExpressionFunctions::new(ThreadSubjectLookup)));
//! let _guard = ThreadSubjectLookup::bind(subject);
//! let html = renderer.render_str(r#"{{#if (hasRole "admin")}}admin{{/if}}"#, &())?;
//! ```

pub mod expressions;
pub mod function;
pub mod helpers;
pub mod renderer;

pub use expressions::{Argument, ExpressionFunctions};
pub use function::FunctionName;
pub use helpers::register_helpers;
pub use renderer::TemplateRenderer;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use warden_contracts::{error::WardenError, tokens::TokenSplitter};
    use warden_core::{FixedSubjectLookup, ThreadSubjectLookup};
    use warden_subject::StaticSubject;

    use crate::{Argument, ExpressionFunctions, FunctionName, TemplateRenderer};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn functions(subject: StaticSubject) -> ExpressionFunctions<FixedSubjectLookup> {
        ExpressionFunctions::new(FixedSubjectLookup::new(subject))
    }

    fn admin_editor() -> StaticSubject {
        StaticSubject::authenticated("jsmith")
            .with_roles(["admin", "editor"])
            .with_permissions(["file:read", "printer:print,query"])
    }

    fn renderer(subject: StaticSubject) -> TemplateRenderer {
        TemplateRenderer::new(Arc::new(functions(subject)))
    }

    // ── 1. reference scenarios ────────────────────────────────────────────────

    #[test]
    fn test_admin_editor_scenario() {
        let f = functions(admin_editor());

        assert!(f.has_all_roles("admin,editor").unwrap());
        assert!(!f.has_all_roles("admin,superadmin").unwrap());
        assert!(f.has_any_roles("superadmin,editor").unwrap());
        assert!(f.has_role("admin").unwrap());
        assert!(f.lacks_role("superadmin").unwrap());
    }

    #[test]
    fn test_guest_scenario() {
        let f = functions(StaticSubject::guest());

        assert!(f.is_guest().unwrap());
        assert!(!f.is_user().unwrap());
        assert!(!f.has_any_roles("admin").unwrap());
        assert!(!f.has_any_roles("").unwrap());
        assert!(!f.is_permitted_any("file:read").unwrap());
        assert!(f.not_authenticated().unwrap());
    }

    #[test]
    fn test_remembered_scenario() {
        let f = functions(StaticSubject::remembered("jsmith"));

        assert!(!f.is_authenticated().unwrap());
        assert!(f.is_remembered().unwrap());
        assert!(f.is_user().unwrap());
    }

    #[test]
    fn test_run_as_scenario() {
        let f = functions(StaticSubject::authenticated("admin").run_as("jdoe").unwrap());
        assert!(f.is_run_as().unwrap());
    }

    // ── 2. delimited arguments ────────────────────────────────────────────────

    #[test]
    fn test_whitespace_and_empty_tokens_are_ignored() {
        let f = functions(admin_editor());

        assert!(f.has_all_roles("  admin , , editor ,").unwrap());
        assert!(f.has_all_roles("").unwrap(), "empty 'all' query is vacuously true");
        assert!(f.has_all_roles("   ").unwrap());
        assert!(!f.has_any_roles("").unwrap(), "empty 'any' query never matches");
        assert!(f.is_permitted_all("").unwrap());
    }

    #[test]
    fn test_quoted_permission_with_comma() {
        let f = functions(admin_editor());

        assert!(f.is_permitted_all(r#""printer:print,query", file:read"#).unwrap());
        assert!(!f.is_permitted_all("printer:print,query").unwrap());
        assert!(f.is_permitted_any(r#"file:write, "printer:print,query""#).unwrap());
    }

    #[test]
    fn test_custom_delimiter() {
        let f = ExpressionFunctions::with_splitter(
            FixedSubjectLookup::new(admin_editor()),
            TokenSplitter::with_delimiter(';'),
        );

        assert!(f.is_permitted_all("printer:print,query; file:read").unwrap());
        assert!(!f.has_all_roles("admin,editor").unwrap(), "',' is no longer a delimiter");
        assert!(f.has_all_roles("admin;editor").unwrap());
    }

    #[test]
    fn test_single_value_functions_do_not_split() {
        let f = functions(admin_editor());
        assert!(f.is_permitted("printer:print,query").unwrap());
        assert!(!f.has_role("admin,editor").unwrap());
    }

    // ── 3. dispatch ───────────────────────────────────────────────────────────

    #[test]
    fn test_function_names_round_trip() {
        for function in FunctionName::ALL {
            assert_eq!(function.as_str().parse::<FunctionName>().unwrap(), function);
        }
        assert_eq!(FunctionName::ALL.iter().filter(|f| f.takes_argument()).count(), 8);
        assert_eq!(FunctionName::ALL.iter().filter(|f| f.takes_list()).count(), 4);
    }

    #[test]
    fn test_evaluate_by_name() {
        let f = functions(admin_editor());

        assert!(f.evaluate("hasAllRoles", Some("admin, editor")).unwrap());
        assert!(f.evaluate("isAuthenticated", None).unwrap());
        assert!(!f.evaluate("notAuthenticated", Some("ignored")).unwrap());
        assert!(f.evaluate("lacksPermission", Some("file:delete")).unwrap());
    }

    #[test]
    fn test_evaluate_unknown_function() {
        let f = functions(admin_editor());
        match f.evaluate("hasSomeRoles", Some("admin")) {
            Err(WardenError::UnknownFunction { name }) => assert_eq!(name, "hasSomeRoles"),
            other => panic!("expected UnknownFunction, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_argument() {
        let f = functions(admin_editor());
        match f.call(FunctionName::HasRole, None) {
            Err(WardenError::MissingArgument { function }) => assert_eq!(function, "hasRole"),
            other => panic!("expected MissingArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_token_arguments() {
        let f = functions(admin_editor());

        assert!(f
            .call_with(FunctionName::HasAllRoles, Argument::Tokens(&["admin", "editor"]))
            .unwrap());
        assert!(f
            .call_with(FunctionName::IsPermitted, Argument::Tokens(&["printer:print,query"]))
            .unwrap());
        assert!(matches!(
            f.call_with(FunctionName::HasRole, Argument::Tokens(&["admin", "editor"])),
            Err(WardenError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_call_covers_every_function() {
        let f = functions(admin_editor());
        let argument = |function: FunctionName| match function {
            FunctionName::HasAllRoles | FunctionName::HasAnyRoles => Some("admin, admin, editor"),
            FunctionName::HasRole | FunctionName::LacksRole => Some("editor"),
            FunctionName::IsPermitted | FunctionName::LacksPermission => Some("file:read"),
            FunctionName::IsPermittedAll | FunctionName::IsPermittedAny => {
                Some(r#"file:read, "printer:print,query", file:read"#)
            }
            _ => None,
        };

        let allowed: Vec<&str> = FunctionName::ALL
            .into_iter()
            .filter(|&function| f.call(function, argument(function)).unwrap())
            .map(FunctionName::as_str)
            .collect();

        assert_eq!(
            allowed,
            vec![
                "hasAllRoles",
                "hasAnyRoles",
                "hasRole",
                "isAuthenticated",
                "isPermitted",
                "isPermittedAll",
                "isPermittedAny",
                "isUser",
            ]
        );
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let f = ExpressionFunctions::new(ThreadSubjectLookup);
        assert!(matches!(f.has_all_roles("admin"), Err(WardenError::NoSubjectBound)));
        assert!(matches!(f.is_guest(), Err(WardenError::NoSubjectBound)));
    }

    // ── 4. Handlebars helpers ─────────────────────────────────────────────────

    #[test]
    fn test_helpers_as_subexpressions() {
        let r = renderer(admin_editor());
        let template = r#"{{#if (hasAnyRoles "superadmin, editor")}}edit{{/if}}|{{#if (isGuest)}}login{{else}}logout{{/if}}"#;

        assert_eq!(r.render_str(template, &json!({})).unwrap(), "edit|logout");
    }

    #[test]
    fn test_helpers_inline() {
        let r = renderer(StaticSubject::guest());
        let out = r
            .render_str(r#"{{isUser}} {{isGuest}} {{hasAnyRoles "admin"}}"#, &json!({}))
            .unwrap();
        assert_eq!(out, "false true false");
    }

    #[test]
    fn test_helpers_take_context_values() {
        let r = renderer(admin_editor());
        let data = json!({
            "needed": ["admin", "editor"],
            "role": "auditor",
        });

        let out = r
            .render_str(r#"{{hasAllRoles needed}} {{lacksRole role}}"#, &data)
            .unwrap();
        assert_eq!(out, "true true");
    }

    #[test]
    fn test_helper_missing_argument_is_render_error() {
        let r = renderer(admin_editor());
        match r.render_str("{{hasRole}}", &json!({})) {
            Err(WardenError::TemplateError { reason }) => {
                assert!(reason.contains("failed to render"), "unexpected reason: {reason}");
            }
            other => panic!("expected TemplateError, got {:?}", other),
        }
    }

    #[test]
    fn test_helper_null_argument_reports_missing_value() {
        let r = renderer(admin_editor());

        match r.render_str("{{lacksRole role}}", &json!({ "role": null })) {
            Err(WardenError::TemplateError { reason }) => {
                assert!(reason.contains("lacksRole"), "unexpected reason: {reason}");
                assert!(reason.contains("missing or null"), "unexpected reason: {reason}");
            }
            other => panic!("expected TemplateError, got {:?}", other),
        }

        // nullary functions ignore the parameter
        assert_eq!(r.render_str("{{isUser nothing}}", &json!({ "nothing": null })).unwrap(), "true");
    }

    #[test]
    fn test_helper_lookup_failure_is_render_error() {
        let r = TemplateRenderer::new(Arc::new(ExpressionFunctions::new(ThreadSubjectLookup)));
        match r.render_str("{{isUser}}", &json!({})) {
            Err(WardenError::TemplateError { reason }) => {
                assert!(reason.contains("no subject is bound"), "unexpected reason: {reason}");
            }
            other => panic!("expected TemplateError, got {:?}", other),
        }
    }

    #[test]
    fn test_helpers_with_thread_bound_subject() {
        let r = TemplateRenderer::new(Arc::new(ExpressionFunctions::new(ThreadSubjectLookup)));

        let _guard = ThreadSubjectLookup::bind(Arc::new(StaticSubject::remembered("jsmith")));
        let out = r
            .render_str("{{isRemembered}} {{isAuthenticated}}", &json!({}))
            .unwrap();
        assert_eq!(out, "true false");
    }

    #[test]
    fn test_registered_template() {
        let mut r = renderer(admin_editor());
        r.register_template("nav", r#"{{#if (hasRole "admin")}}<a href="/admin">Admin</a>{{/if}}"#)
            .unwrap();

        assert_eq!(r.render("nav", &json!({})).unwrap(), r#"<a href="/admin">Admin</a>"#);
    }

    #[test]
    fn test_register_invalid_template() {
        let mut r = renderer(admin_editor());
        assert!(matches!(
            r.register_template("broken", "{{#if}}"),
            Err(WardenError::TemplateError { .. })
        ));
    }
}
