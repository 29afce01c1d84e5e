use std::collections::HashMap;

use swc_core::atoms::Atom;
use swc_core::ecma::ast::Ident;

use crate::uid::UidGenerator;

/// The style import currently supplying rules to the file. The last matching
/// import seen wins.
#[derive(Clone, Debug)]
pub struct StyleImportBinding {
  /// First specifier declared by the import, if any. Cleared once an element
  /// has been rewritten.
  pub named: Option<Ident>,
  /// Generated alias; bound by the import only when `named` is `None`
  pub anonymous: Ident,
  pub source: Atom,
}

impl StyleImportBinding {
  /// Alias used for dynamic lookups: the named one when present.
  pub fn active_alias(&self) -> &Ident {
    self.named.as_ref().unwrap_or(&self.anonymous)
  }
}

/// Mutable state of one file. Created when the module is entered and dropped
/// when it is exited, so nothing carries over to the next file.
#[derive(Debug)]
pub struct FileTransformState {
  pub saw_target_attribute: bool,
  pub performed_rewrite: bool,
  /// Binding of the processing module, reused by every processing call
  pub processor: Ident,
  pub binding: Option<StyleImportBinding>,
  /// Local names of every named style import, for `module.rule` tokens
  pub aliases: HashMap<Atom, Ident>,
  pub uids: UidGenerator,
  pub rewritten_elements: usize,
}

impl FileTransformState {
  pub fn new(processor: Ident, uids: UidGenerator) -> Self {
    FileTransformState {
      saw_target_attribute: false,
      performed_rewrite: false,
      processor,
      binding: None,
      aliases: HashMap::new(),
      uids,
      rewritten_elements: 0,
    }
  }

  /// Processor identifier for a new processing call. Handing it out is what
  /// marks the file as rewritten.
  pub fn processor_for_call(&mut self) -> Ident {
    self.performed_rewrite = true;
    self.processor.clone()
  }
}

/// What the pass did to one file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSummary {
  pub saw_target_attribute: bool,
  pub performed_rewrite: bool,
  pub rewritten_elements: usize,
  pub injected_processor: bool,
  pub removed_auxiliary_import: bool,
}
