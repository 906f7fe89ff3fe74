/// Domain layer: credentials, operation results and the value objects the
/// workflow decisions are made on. Nothing here touches the filesystem or the
/// engine.
pub mod entities;
pub mod value_objects;
