// Leaf converters
pub mod boolean_field;
pub mod char_field;
pub mod float_field;
pub mod integer_field;

// Composite and computed converters
pub mod list_field;
pub mod method_field;
pub mod nested_field;

// Re-exports for leaf converters
pub use boolean_field::BooleanField;
pub use char_field::CharField;
pub use float_field::FloatField;
pub use integer_field::IntegerField;

// Re-exports for composite and computed converters
pub use list_field::ListField;
pub use method_field::MethodField;
pub use nested_field::NestedField;
