//! Binder - constructs a type named by a request and binds its keys.

use std::any::Any;

use optin_coerce::Coercer;
use optin_registry::{Registry, TypeDef};
use tracing::{debug, error, warn};

use crate::error::{BindError, InstantiateError, InstantiateResult};
use crate::options::BinderOptions;
use crate::outcome::{AppliedVia, Binding, BindingResult, KeyOutcome, Outcome, SkipReason};
use crate::request::BindingRequest;
use crate::resolver::{MemberResolver, Resolution, Target};

/// Binds untrusted key/value requests onto registered types.
pub struct Binder<'r> {
    registry: &'r Registry,
    coercer: Coercer,
    resolver: MemberResolver,
    options: BinderOptions,
}

impl<'r> Binder<'r> {
    /// Create a binder with default options.
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_options(registry, BinderOptions::default())
    }

    /// Create a binder with the given options.
    pub fn with_options(registry: &'r Registry, options: BinderOptions) -> Self {
        Self {
            registry,
            coercer: Coercer::new(),
            resolver: MemberResolver::new(options.ignored_keys.iter().cloned()),
            options,
        }
    }

    /// Replace the coercer, e.g. to plug in another boolean parser.
    pub fn with_coercer(mut self, coercer: Coercer) -> Self {
        self.coercer = coercer;
        self
    }

    pub fn options(&self) -> &BinderOptions {
        &self.options
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    // ==================== Instantiation ====================

    /// Construct the type the request names and bind every other key onto it.
    ///
    /// `fallback` is built instead when the request names no type, or names one
    /// that is unknown or not approved. It is not checked for approval.
    /// `default_namespace` qualifies bare type names and overrides the
    /// configured namespace.
    pub fn instantiate(
        &self,
        request: BindingRequest,
        fallback: Option<&TypeDef>,
        default_namespace: Option<&str>,
    ) -> BindingResult {
        let namespace = default_namespace.or(self.options.default_namespace.as_deref());
        let Selected {
            type_def,
            from_fallback,
            fallback_reason,
        } = self.select_type(&request, fallback, namespace)?;

        let mut instance = self.registry.construct(type_def).map_err(|e| {
            error!(type_name = %type_def.name, error = %e, "construction failed");
            InstantiateError::from(e)
        })?;

        let outcomes = self.bind_all(type_def, &mut *instance, &request);

        Ok(Binding {
            type_name: type_def.name.clone(),
            instance,
            outcomes,
            from_fallback,
            fallback_reason,
        })
    }

    /// Instantiate using only the request's own type name and the configured namespace.
    pub fn instantiate_named(&self, request: BindingRequest) -> BindingResult {
        self.instantiate(request, None, None)
    }

    /// Instantiate with the type registered for `T` as the fallback.
    pub fn instantiate_or<T: Any>(
        &self,
        request: BindingRequest,
        default_namespace: Option<&str>,
    ) -> BindingResult {
        let fallback = self.type_for::<T>()?;
        self.instantiate(request, Some(fallback), default_namespace)
    }

    fn select_type<'a>(
        &'a self,
        request: &BindingRequest,
        fallback: Option<&'a TypeDef>,
        namespace: Option<&str>,
    ) -> InstantiateResult<Selected<'a>> {
        let Some(name) = request.get(&self.options.class_key) else {
            return match fallback {
                Some(type_def) => Ok(Selected::fallback(type_def, None)),
                None => {
                    error!(class_key = %self.options.class_key, "request names no type and no fallback was supplied");
                    Err(InstantiateError::MissingType)
                }
            };
        };

        match self.registry.resolve(name, namespace) {
            Ok(type_def) => Ok(Selected {
                type_def,
                from_fallback: false,
                fallback_reason: None,
            }),
            Err(e) => match fallback {
                Some(type_def) => {
                    error!(
                        type_name = %name,
                        fallback = %type_def.name,
                        error = %e,
                        "requested type unusable, using fallback"
                    );
                    Ok(Selected::fallback(type_def, Some(e.into())))
                }
                None => {
                    error!(type_name = %name, error = %e, "requested type unusable");
                    Err(e.into())
                }
            },
        }
    }

    // ==================== Binding ====================

    /// Bind every key onto an existing value of a registered Rust type.
    pub fn bind_into<T: Any>(
        &self,
        target: &mut T,
        request: &BindingRequest,
    ) -> InstantiateResult<Vec<KeyOutcome>> {
        let type_def = self.type_for::<T>()?;
        Ok(self.bind_all(type_def, target, request))
    }

    /// Bind every key onto an erased instance of `type_def`.
    pub fn bind_instance(
        &self,
        type_def: &TypeDef,
        target: &mut dyn Any,
        request: &BindingRequest,
    ) -> InstantiateResult<Vec<KeyOutcome>> {
        if !type_def.is_instance_of(target) {
            error!(type_name = %type_def.name, "instance was not built by this type");
            return Err(InstantiateError::wrong_instance(&type_def.name));
        }
        Ok(self.bind_all(type_def, target, request))
    }

    fn type_for<T: Any>(&self) -> InstantiateResult<&'r TypeDef> {
        self.registry.get_type_for::<T>().ok_or_else(|| {
            let name = std::any::type_name::<T>();
            error!(type_name = %name, "Rust type is not registered");
            InstantiateError::type_not_found(name)
        })
    }

    fn bind_all(
        &self,
        type_def: &TypeDef,
        target: &mut dyn Any,
        request: &BindingRequest,
    ) -> Vec<KeyOutcome> {
        request
            .iter()
            .filter(|(key, _)| *key != self.options.class_key)
            .map(|(key, text)| KeyOutcome::new(key, self.bind_key(type_def, target, key, text)))
            .collect()
    }

    fn bind_key(&self, type_def: &TypeDef, target: &mut dyn Any, key: &str, text: &str) -> Outcome {
        let result = self
            .resolver
            .resolve(type_def, key)
            .and_then(|resolution| match resolution {
                Resolution::Bind(member) => self.apply(member, target, key, text).map(Some),
                Resolution::Ignored => Ok(None),
            });

        match result {
            Ok(Some(via)) => {
                debug!(type_name = %type_def.name, key = %key, via = %via, "applied");
                Outcome::Applied(via)
            }
            Ok(None) => {
                debug!(type_name = %type_def.name, key = %key, "ignored");
                Outcome::Skipped(SkipReason::Ignored)
            }
            Err(e) => {
                warn!(type_name = %type_def.name, key = %key, error = %e, "key not bound");
                Outcome::Failed(e)
            }
        }
    }

    fn apply(
        &self,
        member: Target<'_>,
        target: &mut dyn Any,
        key: &str,
        text: &str,
    ) -> Result<AppliedVia, BindError> {
        let value = self
            .coercer
            .coerce(text, &member.declared_type())
            .map_err(|e| BindError::coercion(key, e))?;

        member
            .apply(target, value)
            .map_err(|e| BindError::invocation(key, member.name(), e.to_string()))?;

        Ok(match member {
            Target::Field(field) => AppliedVia::field(&field.name),
            Target::Accessor(accessor) => AppliedVia::accessor(&accessor.name),
        })
    }
}

/// The type chosen for a request.
struct Selected<'a> {
    type_def: &'a TypeDef,
    from_fallback: bool,
    fallback_reason: Option<InstantiateError>,
}

impl<'a> Selected<'a> {
    fn fallback(type_def: &'a TypeDef, reason: Option<InstantiateError>) -> Self {
        Self {
            type_def,
            from_fallback: true,
            fallback_reason: reason,
        }
    }
}

impl std::fmt::Debug for Binder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder")
            .field("types", &self.registry.type_count())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
