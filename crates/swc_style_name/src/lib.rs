//! Rewrites declarative `styleName` attributes on JSX elements into `style`
//! values computed from imported style sheets at run time.
//!
//! ```jsx
//! import "./Button.css";
//! <View styleName="wrapper text-large" />
//! ```
//!
//! becomes
//!
//! ```jsx
//! import _temp from "./Button.css";
//! var _reactNativeDynamicStyleProcessor = require("react-native-dynamic-style-processor");
//! <View style={[
//!   _reactNativeDynamicStyleProcessor.process(_temp).wrapper,
//!   _reactNativeDynamicStyleProcessor.process(_temp)["text-large"]
//! ]} />
//! ```
mod attributes;
mod class_names;
mod config;
mod errors;
mod expressions;
mod import_resolver;
mod injector;
mod state;
mod transformer;
mod uid;

pub use class_names::{parse_class_names, ClassNameToken};
pub use config::{StyleNameConfig, DEFAULT_ATTRIBUTE_NAME, DEFAULT_PROCESSOR_MODULE};
pub use errors::StyleNameError;
pub use state::FileSummary;
pub use transformer::StyleNameTransformer;
pub use uid::UidGenerator;
