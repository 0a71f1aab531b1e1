//! Cross-module scenarios: integration, influence zones, containment and
//! camera tracking driven through the public engine types

mod end_to_end;
