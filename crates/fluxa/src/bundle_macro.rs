//! Macro for declaring bundles of related action creators.

/// Declare a struct that owns a factory and a set of named creators.
///
/// The generated struct gets a `new(factory)` constructor that declares
/// every creator on the factory (so duplicate types fail fast), and a
/// [`HasFactory`](crate::HasFactory) impl so the whole bundle can be handed
/// to [`is_namespace`](crate::is_namespace).
///
/// # Example
///
/// ```
/// use fluxa::{action_bundle, is_namespace, ActionCreatorFactory, Guard};
///
/// action_bundle! {
///     pub struct TodoActions {
///         add: String = "ADD",
///         toggle: usize = "TOGGLE",
///         clear: () = "CLEAR",
///     }
/// }
///
/// let todos = TodoActions::new(ActionCreatorFactory::new(Some("todos"))).unwrap();
/// assert_eq!(todos.add.action_type(), "todos/ADD");
/// assert!(is_namespace(&todos).test(&todos.clear.empty()));
/// ```
#[macro_export]
macro_rules! action_bundle {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_attr:meta])* $field:ident : $payload:ty = $local:literal ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            pub factory: $crate::ActionCreatorFactory,
            $( $(#[$field_attr])* pub $field: $crate::ActionCreator<$payload>, )*
        }

        impl $name {
            /// Declare every creator of this bundle on `factory`.
            $vis fn new(
                factory: $crate::ActionCreatorFactory,
            ) -> ::core::result::Result<Self, $crate::FsaError> {
                $( let $field = factory.create::<$payload>($local)?; )*
                ::core::result::Result::Ok(Self { factory, $( $field, )* })
            }
        }

        impl $crate::HasFactory for $name {
            fn factory(&self) -> &$crate::ActionCreatorFactory {
                &self.factory
            }
        }
    };
}
