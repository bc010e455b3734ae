//! Action creator factories, async triads and duplicate-type policy.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashSet;
use serde::{Deserialize, Serialize};

use crate::action::{Failure, Meta, Success};
use crate::creator::ActionCreator;
use crate::error::{is_error_value, ErasedPredicate, ErrorPolicy, FsaError};

/// Separator between namespace and local type.
pub const DELIMITER: char = '/';

/// Suffix of an async triad's `started` type.
pub const STARTED_SUFFIX: &str = "_STARTED";
/// Suffix of an async triad's `done` type.
pub const DONE_SUFFIX: &str = "_DONE";
/// Suffix of an async triad's `failed` type.
pub const FAILED_SUFFIX: &str = "_FAILED";

/// Environment variable consulted by [`DuplicateCheck::from_env`].
pub const MODE_ENV_VAR: &str = "FLUXA_MODE";

/// Whether a factory rejects duplicate type strings.
///
/// The check is a startup-time guard against typos and copy-paste. With it
/// disabled, duplicate creators coexist and are indistinguishable by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateCheck {
    Enabled,
    Disabled,
}

impl DuplicateCheck {
    /// Read the mode from `FLUXA_MODE`.
    ///
    /// `production` disables the check, any other value enables it. When the
    /// variable is unset the build profile decides (see [`Default`]).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading `FLUXA_MODE` through
    /// `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Self {
        match lookup(MODE_ENV_VAR) {
            Some(mode) => Self::from_mode(&mode),
            None => Self::default(),
        }
    }

    fn from_mode(mode: &str) -> Self {
        if mode.trim().eq_ignore_ascii_case("production") {
            DuplicateCheck::Disabled
        } else {
            DuplicateCheck::Enabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == DuplicateCheck::Enabled
    }
}

impl Default for DuplicateCheck {
    /// Enabled in debug builds, disabled in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            DuplicateCheck::Enabled
        } else {
            DuplicateCheck::Disabled
        }
    }
}

/// Declarative factory settings, typically loaded from the host's config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub namespace: Option<String>,
    pub meta: Option<Meta>,
    pub duplicate_check: Option<DuplicateCheck>,
}

/// Three creators describing one asynchronous operation.
pub struct AsyncActionCreators<P, S, E> {
    /// Base type shared by the triad, namespace included.
    pub action_type: String,
    pub started: ActionCreator<P>,
    pub done: ActionCreator<Success<P, S>>,
    pub failed: ActionCreator<Failure<P, E>>,
}

impl<P, S, E> Clone for AsyncActionCreators<P, S, E> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            started: self.started.clone(),
            done: self.done.clone(),
            failed: self.failed.clone(),
        }
    }
}

impl<P, S, E> fmt::Debug for AsyncActionCreators<P, S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncActionCreators")
            .field("type", &self.action_type)
            .field("started", &self.started.action_type())
            .field("done", &self.done.action_type())
            .field("failed", &self.failed.action_type())
            .finish()
    }
}

/// Mints uniquely-typed [`ActionCreator`]s under an optional namespace.
///
/// Each factory owns its own registry of type strings. Clones and
/// [`child`](Self::child) factories share that registry; independently
/// constructed factories never do.
///
/// The registry is a concurrent set with atomic check-and-insert, so
/// creators may be declared from several threads.
///
/// # Examples
///
/// ```
/// use fluxa::ActionCreatorFactory;
///
/// let factory = ActionCreatorFactory::new(Some("todos"));
/// let add = factory.create::<String>("ADD").unwrap();
/// assert_eq!(add.action_type(), "todos/ADD");
///
/// let fetch = factory.create_async::<u32, Vec<String>, String>("FETCH").unwrap();
/// assert_eq!(fetch.started.action_type(), "todos/FETCH_STARTED");
/// ```
#[derive(Clone)]
pub struct ActionCreatorFactory {
    base: String,
    meta: Option<Arc<Meta>>,
    default_is_error: ErasedPredicate,
    duplicate_check: DuplicateCheck,
    registry: Arc<DashSet<String>>,
}

impl ActionCreatorFactory {
    /// Factory with default meta, error predicate and duplicate check.
    pub fn new(namespace: Option<&str>) -> Self {
        let mut builder = Self::builder();
        if let Some(ns) = namespace {
            builder = builder.namespace(ns);
        }
        builder.build()
    }

    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::default()
    }

    /// Build a factory from declarative settings.
    ///
    /// An absent `duplicate_check` falls back to [`DuplicateCheck::from_env`].
    pub fn from_config(config: FactoryConfig) -> Self {
        Self::from_config_or(config, DuplicateCheck::from_env)
    }

    fn from_config_or(config: FactoryConfig, fallback: impl FnOnce() -> DuplicateCheck) -> Self {
        let mut builder =
            Self::builder().duplicate_check(config.duplicate_check.unwrap_or_else(fallback));
        if let Some(ns) = config.namespace {
            builder = builder.namespace(ns);
        }
        if let Some(meta) = config.meta {
            builder = builder.meta(meta);
        }
        builder.build()
    }

    /// Namespace prefix including the trailing delimiter, or `""`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Namespace without the trailing delimiter.
    pub fn namespace(&self) -> Option<&str> {
        self.base.strip_suffix(DELIMITER)
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_deref()
    }

    pub fn duplicate_check(&self) -> DuplicateCheck {
        self.duplicate_check
    }

    /// Full type string for a local type.
    pub fn full_type(&self, local_type: &str) -> String {
        format!("{}{}", self.base, local_type)
    }

    /// Type strings registered so far, sorted.
    ///
    /// Always empty while the duplicate check is disabled, since nothing is
    /// recorded in that mode.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.registry.iter().map(|t| t.key().clone()).collect();
        types.sort();
        types
    }

    /// Nested factory whose namespace is `"{parent}/{namespace}"`.
    ///
    /// The child inherits meta, error predicate and duplicate policy, and
    /// shares the parent's registry so types stay unique across both. An
    /// empty `namespace` yields a factory with the parent's base.
    pub fn child(&self, namespace: &str) -> Self {
        let base = if namespace.is_empty() {
            self.base.clone()
        } else {
            format!("{}{}{}", self.base, namespace, DELIMITER)
        };

        Self {
            base,
            meta: self.meta.clone(),
            default_is_error: Arc::clone(&self.default_is_error),
            duplicate_check: self.duplicate_check,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Creator using the factory's default error predicate and no common meta.
    ///
    /// # Errors
    ///
    /// [`FsaError::DuplicateType`] if this factory already produced the same
    /// full type and the duplicate check is enabled.
    pub fn create<P: Any>(&self, local_type: &str) -> Result<ActionCreator<P>, FsaError> {
        self.create_with(local_type, None, ErrorPolicy::Default)
    }

    /// Creator with common meta and an explicit error policy.
    ///
    /// `error` accepts an [`ErrorPolicy`] or a plain `bool`.
    pub fn create_with<P: Any>(
        &self,
        local_type: &str,
        common_meta: Option<Meta>,
        error: impl Into<ErrorPolicy<P>>,
    ) -> Result<ActionCreator<P>, FsaError> {
        let action_type = self.full_type(local_type);
        self.register(&action_type)?;
        Ok(self.mint(action_type, common_meta, error.into()))
    }

    /// Started/done/failed creators for one asynchronous operation.
    ///
    /// Types are `local_type` plus `_STARTED`, `_DONE` and `_FAILED`.
    /// `started` and `done` never carry the error flag, `failed` always does.
    pub fn create_async<P: Any, S: Any, E: Any>(
        &self,
        local_type: &str,
    ) -> Result<AsyncActionCreators<P, S, E>, FsaError> {
        self.create_async_with(local_type, None, ErrorPolicy::Never)
    }

    /// Like [`create_async`](Self::create_async), with common meta attached to
    /// all three creators and an explicit error policy for `done`.
    ///
    /// The triad registers as a unit: if any member's type is taken, none of
    /// the three is left registered.
    pub fn create_async_with<P: Any, S: Any, E: Any>(
        &self,
        local_type: &str,
        common_meta: Option<Meta>,
        done_error: impl Into<ErrorPolicy<Success<P, S>>>,
    ) -> Result<AsyncActionCreators<P, S, E>, FsaError> {
        let [started_type, done_type, failed_type] = [STARTED_SUFFIX, DONE_SUFFIX, FAILED_SUFFIX]
            .map(|suffix| self.full_type(&format!("{local_type}{suffix}")));
        self.register_all(&[
            started_type.as_str(),
            done_type.as_str(),
            failed_type.as_str(),
        ])?;

        Ok(AsyncActionCreators {
            action_type: self.full_type(local_type),
            started: self.mint(started_type, common_meta.clone(), ErrorPolicy::Never),
            done: self.mint(done_type, common_meta.clone(), done_error.into()),
            failed: self.mint(failed_type, common_meta, ErrorPolicy::Always),
        })
    }

    fn mint<P: Any>(
        &self,
        action_type: String,
        common_meta: Option<Meta>,
        error: ErrorPolicy<P>,
    ) -> ActionCreator<P> {
        ActionCreator::new(
            action_type,
            self.base.clone(),
            self.meta.clone(),
            common_meta,
            error,
            Arc::clone(&self.default_is_error),
        )
    }

    /// Register every type or none of them.
    fn register_all(&self, action_types: &[&str]) -> Result<(), FsaError> {
        for (i, action_type) in action_types.iter().enumerate() {
            if let Err(err) = self.register(action_type) {
                for taken in &action_types[..i] {
                    self.registry.remove(*taken);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn register(&self, action_type: &str) -> Result<(), FsaError> {
        if !self.duplicate_check.is_enabled() {
            return Ok(());
        }

        if !self.registry.insert(action_type.to_owned()) {
            tracing::warn!(action_type, "duplicate action type rejected");
            return Err(FsaError::DuplicateType {
                action_type: action_type.to_owned(),
            });
        }

        tracing::debug!(action_type, "registered action type");
        Ok(())
    }
}

impl Default for ActionCreatorFactory {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for ActionCreatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreatorFactory")
            .field("base", &self.base)
            .field("meta", &self.meta)
            .field("duplicate_check", &self.duplicate_check)
            .field("registered", &self.registry.len())
            .finish()
    }
}

/// Builder for [`ActionCreatorFactory`].
pub struct FactoryBuilder {
    namespace: Option<String>,
    meta: Option<Meta>,
    default_is_error: ErasedPredicate,
    duplicate_check: DuplicateCheck,
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self {
            namespace: None,
            meta: None,
            default_is_error: Arc::new(is_error_value),
            duplicate_check: DuplicateCheck::default(),
        }
    }
}

impl FactoryBuilder {
    /// Namespace joined to every local type with [`DELIMITER`].
    ///
    /// An empty namespace is the same as none.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Meta attached to every action from this factory.
    pub fn meta(mut self, meta: impl Into<Meta>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Predicate used by creators with [`ErrorPolicy::Default`].
    pub fn default_error_predicate(
        mut self,
        predicate: impl Fn(&dyn Any) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.default_is_error = Arc::new(predicate);
        self
    }

    pub fn duplicate_check(mut self, check: DuplicateCheck) -> Self {
        self.duplicate_check = check;
        self
    }

    pub fn build(self) -> ActionCreatorFactory {
        let base = match self.namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}{DELIMITER}"),
            _ => String::new(),
        };

        ActionCreatorFactory {
            base,
            meta: self.meta.filter(|m| !m.is_empty()).map(Arc::new),
            default_is_error: self.default_is_error,
            duplicate_check: self.duplicate_check,
            registry: Arc::new(DashSet::new()),
        }
    }
}

/// Access to the factory behind a bundle of related creators.
///
/// Implemented by the factory itself and by bundles declared with
/// [`action_bundle!`](crate::action_bundle), so namespace checks accept
/// either.
pub trait HasFactory {
    fn factory(&self) -> &ActionCreatorFactory;
}

impl HasFactory for ActionCreatorFactory {
    fn factory(&self) -> &ActionCreatorFactory {
        self
    }
}

impl<T: HasFactory + ?Sized> HasFactory for &T {
    fn factory(&self) -> &ActionCreatorFactory {
        (**self).factory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checked(namespace: Option<&str>) -> ActionCreatorFactory {
        let mut builder = ActionCreatorFactory::builder().duplicate_check(DuplicateCheck::Enabled);
        if let Some(ns) = namespace {
            builder = builder.namespace(ns);
        }
        builder.build()
    }

    fn random_ident(rng: &mut fastrand::Rng) -> String {
        let len = rng.usize(1..12);
        (0..len).map(|_| rng.alphanumeric()).collect()
    }

    #[test]
    fn full_type_joins_namespace_with_delimiter() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let ns = random_ident(&mut rng);
            let local = random_ident(&mut rng);

            let factory = checked(Some(&ns));
            let creator = factory.create::<()>(&local).unwrap();
            assert_eq!(creator.action_type(), format!("{ns}/{local}"));
            assert_eq!(creator.base(), format!("{ns}/"));

            let bare = checked(None).create::<()>(&local).unwrap();
            assert_eq!(bare.action_type(), local);
            assert_eq!(bare.base(), "");
        }
    }

    #[test]
    fn empty_namespace_means_no_prefix() {
        let factory = checked(Some(""));
        assert_eq!(factory.base(), "");
        assert_eq!(factory.namespace(), None);
        assert_eq!(factory.create::<()>("ADD").unwrap().action_type(), "ADD");
    }

    #[test]
    fn namespace_strips_delimiter() {
        assert_eq!(checked(Some("todos")).namespace(), Some("todos"));
    }

    #[test]
    fn duplicate_type_is_rejected_when_checked() {
        let factory = checked(Some("todos"));
        factory.create::<()>("ADD").unwrap();

        let err = factory.create::<String>("ADD").unwrap_err();
        assert_eq!(
            err,
            FsaError::DuplicateType {
                action_type: "todos/ADD".into()
            }
        );
    }

    #[test]
    fn duplicates_coexist_when_unchecked() {
        let factory = ActionCreatorFactory::builder()
            .namespace("todos")
            .duplicate_check(DuplicateCheck::Disabled)
            .build();

        let a = factory.create::<()>("ADD").unwrap();
        let b = factory.create::<()>("ADD").unwrap();
        assert_eq!(a.action_type(), b.action_type());
        assert!(factory.registered_types().is_empty());
    }

    #[test]
    fn independent_factories_do_not_share_registry() {
        let first = checked(Some("todos"));
        let second = checked(Some("todos"));
        first.create::<()>("ADD").unwrap();
        assert!(second.create::<()>("ADD").is_ok());
    }

    #[test]
    fn clones_share_registry() {
        let factory = checked(None);
        let clone = factory.clone();
        factory.create::<()>("PING").unwrap();
        assert!(clone.create::<()>("PING").is_err());
    }

    #[test]
    fn child_extends_namespace_and_shares_registry() {
        let app = checked(Some("app"));
        let todos = app.child("todos");
        assert_eq!(todos.base(), "app/todos/");

        todos.create::<()>("ADD").unwrap();
        assert_eq!(app.registered_types(), vec!["app/todos/ADD".to_string()]);
        assert!(app.create::<()>("todos/ADD").is_err());
    }

    #[test]
    fn empty_child_keeps_parent_base() {
        let app = checked(Some("app"));
        let same = app.child("");
        assert_eq!(same.base(), "app/");
        assert_eq!(same.namespace(), Some("app"));

        same.create::<()>("ADD").unwrap();
        assert!(app.create::<()>("ADD").is_err());

        let root = checked(None).child("");
        assert_eq!(root.base(), "");
    }

    #[test]
    fn async_triad_types() {
        let factory = checked(None);
        let fetch = factory.create_async::<u32, String, String>("FETCH").unwrap();

        assert_eq!(fetch.action_type, "FETCH");
        assert_eq!(fetch.started.action_type(), "FETCH_STARTED");
        assert_eq!(fetch.done.action_type(), "FETCH_DONE");
        assert_eq!(fetch.failed.action_type(), "FETCH_FAILED");
    }

    #[test]
    fn async_triad_is_namespaced() {
        let factory = checked(Some("users"));
        let fetch = factory.create_async::<(), (), ()>("FETCH").unwrap();

        assert_eq!(fetch.action_type, "users/FETCH");
        assert_eq!(fetch.started.action_type(), "users/FETCH_STARTED");
        assert_eq!(fetch.done.action_type(), "users/FETCH_DONE");
        assert_eq!(fetch.failed.action_type(), "users/FETCH_FAILED");
    }

    #[test]
    fn async_triad_error_flags() {
        let factory = checked(None);
        let fetch = factory
            .create_async::<u32, String, anyhow::Error>("FETCH")
            .unwrap();

        assert!(!fetch.started.create(1).error);
        assert!(
            !fetch
                .done
                .create(Success {
                    params: 1,
                    result: "ok".into()
                })
                .error
        );
        assert!(
            fetch
                .failed
                .create(Failure {
                    params: 1,
                    error: anyhow::anyhow!("boom")
                })
                .error
        );
    }

    #[test]
    fn async_done_policy_is_overridable() {
        let factory = checked(None);
        let save = factory
            .create_async_with::<(), bool, String>(
                "SAVE",
                None,
                ErrorPolicy::predicate(|s: &Success<(), bool>| !s.result),
            )
            .unwrap();

        assert!(!save.done.create(Success { params: (), result: true }).error);
        assert!(save.done.create(Success { params: (), result: false }).error);
    }

    #[test]
    fn async_common_meta_reaches_all_three() {
        let factory = checked(None);
        let meta = Meta::from_iter([("op".to_string(), json!("load"))]);
        let load = factory
            .create_async_with::<(), (), ()>("LOAD", Some(meta), ErrorPolicy::Never)
            .unwrap();

        assert_eq!(load.started.empty().meta.unwrap()["op"], "load");
        let done = load.done.create(Success { params: (), result: () });
        assert_eq!(done.meta.unwrap()["op"], "load");
        let failed = load.failed.create(Failure { params: (), error: () });
        assert_eq!(failed.meta.unwrap()["op"], "load");
    }

    #[test]
    fn async_triad_registers_each_member() {
        let factory = checked(None);
        factory.create_async::<(), (), ()>("FETCH").unwrap();
        assert_eq!(
            factory.registered_types(),
            vec!["FETCH_DONE", "FETCH_FAILED", "FETCH_STARTED"]
        );
        assert!(factory.create::<()>("FETCH_DONE").is_err());
        assert!(factory.create_async::<(), (), ()>("FETCH").is_err());
    }

    #[test]
    fn failed_triad_leaves_nothing_registered() {
        let factory = checked(None);
        factory.create::<()>("FETCH_DONE").unwrap();

        let err = factory.create_async::<(), (), ()>("FETCH").unwrap_err();
        assert_eq!(
            err,
            FsaError::DuplicateType {
                action_type: "FETCH_DONE".into()
            }
        );
        assert_eq!(factory.registered_types(), vec!["FETCH_DONE"]);
        assert!(factory.create::<()>("FETCH_STARTED").is_ok());
        assert!(factory.create::<()>("FETCH_FAILED").is_ok());
    }

    #[test]
    fn triad_clash_on_last_member_rolls_back_the_rest() {
        let factory = checked(Some("sync"));
        factory.create::<()>("PUSH_FAILED").unwrap();

        assert!(factory.create_async::<(), (), ()>("PUSH").is_err());
        assert_eq!(factory.registered_types(), vec!["sync/PUSH_FAILED"]);
    }

    #[test]
    fn layered_meta_from_factory_creator_and_call() {
        let factory = ActionCreatorFactory::builder()
            .meta(Meta::from_iter([("a".to_string(), json!(1))]))
            .duplicate_check(DuplicateCheck::Enabled)
            .build();
        let c = factory
            .create_with::<()>(
                "X",
                Some(Meta::from_iter([("b".to_string(), json!(2))])),
                ErrorPolicy::Default,
            )
            .unwrap();

        let action = c.create_with_meta((), Meta::from_iter([("c".to_string(), json!(3))]));
        assert_eq!(
            action.meta,
            Some(Meta::from_iter([
                ("a".to_string(), json!(1)),
                ("b".to_string(), json!(2)),
                ("c".to_string(), json!(3)),
            ]))
        );
    }

    #[test]
    fn no_meta_anywhere_omits_field() {
        let factory = ActionCreatorFactory::builder()
            .meta(Meta::new())
            .duplicate_check(DuplicateCheck::Enabled)
            .build();
        let c = factory.create::<()>("X").unwrap();
        assert_eq!(c.empty().meta, None);
    }

    #[test]
    fn custom_default_predicate() {
        let factory = ActionCreatorFactory::builder()
            .default_error_predicate(|p| {
                p.downcast_ref::<String>()
                    .is_some_and(|s| s.starts_with("ERR"))
            })
            .duplicate_check(DuplicateCheck::Enabled)
            .build();
        let log = factory.create::<String>("LOG").unwrap();

        assert!(log.create("ERR: disk".into()).error);
        assert!(!log.create("ok".into()).error);
    }

    #[test]
    fn bool_policy_overrides_default_predicate() {
        let factory = checked(None);
        let flagged = factory.create_with::<String>("FLAGGED", None, true).unwrap();
        let quiet = factory
            .create_with::<anyhow::Error>("QUIET", None, false)
            .unwrap();

        assert!(flagged.create("fine".into()).error);
        assert!(!quiet.create(anyhow::anyhow!("boom")).error);
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(DuplicateCheck::from_mode("production"), DuplicateCheck::Disabled);
        assert_eq!(DuplicateCheck::from_mode(" Production "), DuplicateCheck::Disabled);
        assert_eq!(DuplicateCheck::from_mode("development"), DuplicateCheck::Enabled);
        assert_eq!(DuplicateCheck::from_mode(""), DuplicateCheck::Enabled);
    }

    #[test]
    fn mode_lookup_reads_mode_variable() {
        let production = DuplicateCheck::from_lookup(|key| {
            assert_eq!(key, MODE_ENV_VAR);
            Some("production".into())
        });
        assert_eq!(production, DuplicateCheck::Disabled);

        let staging = DuplicateCheck::from_lookup(|_| Some("staging".into()));
        assert_eq!(staging, DuplicateCheck::Enabled);

        let unset = DuplicateCheck::from_lookup(|_| None);
        assert_eq!(unset, DuplicateCheck::default());
    }

    #[test]
    fn from_env_honours_production_mode() {
        // The only test that touches this variable.
        std::env::set_var(MODE_ENV_VAR, "production");
        let check = DuplicateCheck::from_env();
        let factory = ActionCreatorFactory::from_config(FactoryConfig::default());
        std::env::remove_var(MODE_ENV_VAR);

        assert_eq!(check, DuplicateCheck::Disabled);
        assert_eq!(factory.duplicate_check(), DuplicateCheck::Disabled);
    }

    #[test]
    fn config_without_check_uses_fallback() {
        let factory = ActionCreatorFactory::from_config_or(FactoryConfig::default(), || {
            DuplicateCheck::Disabled
        });
        assert_eq!(factory.duplicate_check(), DuplicateCheck::Disabled);
        factory.create::<()>("ADD").unwrap();
        assert!(factory.create::<()>("ADD").is_ok());

        let explicit = FactoryConfig {
            duplicate_check: Some(DuplicateCheck::Enabled),
            ..FactoryConfig::default()
        };
        let factory = ActionCreatorFactory::from_config_or(explicit, || DuplicateCheck::Disabled);
        assert_eq!(factory.duplicate_check(), DuplicateCheck::Enabled);
    }

    #[test]
    fn default_check_follows_build_profile() {
        assert_eq!(DuplicateCheck::default().is_enabled(), cfg!(debug_assertions));
    }

    #[test]
    fn config_deserializes_and_builds() {
        let config: FactoryConfig = serde_json::from_value(json!({
            "namespace": "todos",
            "meta": {"app": "demo"},
            "duplicate_check": "enabled"
        }))
        .unwrap();

        let factory = ActionCreatorFactory::from_config(config);
        assert_eq!(factory.base(), "todos/");
        assert_eq!(factory.duplicate_check(), DuplicateCheck::Enabled);
        let c = factory.create::<()>("ADD").unwrap();
        assert_eq!(c.empty().meta.unwrap()["app"], "demo");
    }

    #[test]
    fn config_defaults_are_empty() {
        let config: FactoryConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, FactoryConfig::default());
    }

    #[test]
    fn concurrent_declaration_admits_one_winner() {
        let factory = checked(Some("race"));
        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| factory.create::<()>("GO").is_ok()))
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });
        assert_eq!(winners, 1);
    }
}
