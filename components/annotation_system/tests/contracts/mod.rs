//! Contract tests for the annotation system component.
