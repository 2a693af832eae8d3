use gpui::SharedString;
use indexmap::{IndexMap, map::Entry};
use smallvec::SmallVec;
use tracing::{debug, warn};

pub type KnobOptions = SmallVec<[SharedString; 8]>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KnobError {
    #[error("no knob is registered under \"{0}\"")]
    Missing(SharedString),

    #[error("knob \"{label}\" is not a {expected} knob")]
    WrongKind {
        label: SharedString,
        expected: &'static str,
    },

    #[error("\"{option}\" is not one of the options of knob \"{label}\"")]
    UnknownOption {
        label: SharedString,
        option: SharedString,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KnobValue {
    Text {
        value: SharedString,
        default: SharedString,
    },
    Select {
        options: KnobOptions,
        selected: SharedString,
        default: SharedString,
    },
}

impl KnobValue {
    pub fn current(&self) -> &SharedString {
        match self {
            KnobValue::Text { value, .. } => value,
            KnobValue::Select { selected, .. } => selected,
        }
    }

    fn reset(&mut self) {
        match self {
            KnobValue::Text { value, default } => *value = default.clone(),
            KnobValue::Select {
                selected, default, ..
            } => *selected = default.clone(),
        }
    }
}

/// Interactive sample values for a story.
///
/// A story asks for a knob by label each time it renders. The first request
/// registers the knob with its default; later requests return whatever value
/// the knob currently holds. Knobs are listed in registration order.
#[derive(Clone, Debug, Default)]
pub struct Knobs {
    knobs: IndexMap<SharedString, KnobValue>,
}

impl Knobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A free text knob.
    pub fn text(
        &mut self,
        label: impl Into<SharedString>,
        default: impl Into<SharedString>,
    ) -> SharedString {
        let default = default.into();

        match self.knobs.entry(label.into()) {
            Entry::Occupied(mut entry) => {
                if let KnobValue::Text { value, .. } = entry.get() {
                    return value.clone();
                }

                warn!(label = %entry.key(), "select knob re-registered as a text knob");
                entry.insert(KnobValue::Text {
                    value: default.clone(),
                    default: default.clone(),
                });
                default
            }
            Entry::Vacant(entry) => {
                debug!(label = %entry.key(), "registered text knob");
                entry.insert(KnobValue::Text {
                    value: default.clone(),
                    default: default.clone(),
                });
                default
            }
        }
    }

    /// A knob choosing one of `options`.
    ///
    /// When the options change between renders, the current selection is kept
    /// if it is still one of them and falls back to `default` otherwise.
    pub fn select<I, S>(
        &mut self,
        label: impl Into<SharedString>,
        options: I,
        default: impl Into<SharedString>,
    ) -> SharedString
    where
        I: IntoIterator<Item = S>,
        S: Into<SharedString>,
    {
        let options: KnobOptions = options.into_iter().map(Into::into).collect();
        let default = default.into();

        match self.knobs.entry(label.into()) {
            Entry::Occupied(mut entry) => {
                let selected = match entry.get() {
                    KnobValue::Select { selected, .. } if options.contains(selected) => {
                        selected.clone()
                    }
                    KnobValue::Select { .. } => default.clone(),
                    KnobValue::Text { .. } => {
                        warn!(label = %entry.key(), "text knob re-registered as a select knob");
                        default.clone()
                    }
                };

                entry.insert(KnobValue::Select {
                    options,
                    selected: selected.clone(),
                    default,
                });
                selected
            }
            Entry::Vacant(entry) => {
                debug!(label = %entry.key(), options = options.len(), "registered select knob");
                entry.insert(KnobValue::Select {
                    options,
                    selected: default.clone(),
                    default: default.clone(),
                });
                default
            }
        }
    }

    pub fn set_text(&mut self, label: &str, new_value: impl Into<SharedString>) -> Result<(), KnobError> {
        match self.get_mut(label)? {
            KnobValue::Text { value, .. } => {
                *value = new_value.into();
                debug!(label, value = %value, "text knob changed");
                Ok(())
            }
            KnobValue::Select { .. } => Err(KnobError::WrongKind {
                label: SharedString::from(label.to_string()),
                expected: "text",
            }),
        }
    }

    pub fn set_selected(&mut self, label: &str, option: impl Into<SharedString>) -> Result<(), KnobError> {
        let option = option.into();

        match self.get_mut(label)? {
            KnobValue::Select {
                options, selected, ..
            } => {
                if !options.contains(&option) {
                    return Err(KnobError::UnknownOption {
                        label: SharedString::from(label.to_string()),
                        option,
                    });
                }

                debug!(label, option = %option, "select knob changed");
                *selected = option;
                Ok(())
            }
            KnobValue::Text { .. } => Err(KnobError::WrongKind {
                label: SharedString::from(label.to_string()),
                expected: "select",
            }),
        }
    }

    /// Restores a single knob to its default value.
    pub fn reset(&mut self, label: &str) -> Result<(), KnobError> {
        self.get_mut(label)?.reset();
        Ok(())
    }

    pub fn reset_all(&mut self) {
        self.knobs.values_mut().for_each(KnobValue::reset);
    }

    pub fn get(&self, label: &str) -> Option<&KnobValue> {
        self.knobs.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SharedString, &KnobValue)> {
        self.knobs.iter()
    }

    pub fn len(&self) -> usize {
        self.knobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knobs.is_empty()
    }

    fn get_mut(&mut self, label: &str) -> Result<&mut KnobValue, KnobError> {
        self.knobs
            .get_mut(label)
            .ok_or_else(|| KnobError::Missing(SharedString::from(label.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATS: [&str; 3] = [
        "https://placekitten.com/g/200/300",
        "https://placekitten.com/g/300/300",
        "https://placekitten.com/g/300/400",
    ];

    #[test]
    fn test_text_knob_returns_default_until_changed() {
        let mut knobs = Knobs::new();

        assert_eq!(knobs.text("Name", "Billy Boy").as_ref(), "Billy Boy");
        assert_eq!(knobs.text("Name", "Billy Boy").as_ref(), "Billy Boy");

        knobs.set_text("Name", "Sally").unwrap();
        assert_eq!(knobs.text("Name", "Billy Boy").as_ref(), "Sally");
        assert_eq!(knobs.len(), 1);
    }

    #[test]
    fn test_select_knob_selection() {
        let mut knobs = Knobs::new();

        assert_eq!(knobs.select("ImageUrl", CATS, CATS[0]).as_ref(), CATS[0]);

        knobs.set_selected("ImageUrl", CATS[2]).unwrap();
        assert_eq!(knobs.select("ImageUrl", CATS, CATS[0]).as_ref(), CATS[2]);
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let mut knobs = Knobs::new();
        knobs.select("ImageUrl", CATS, CATS[0]);

        let error = knobs.set_selected("ImageUrl", "https://example.com/dog.png").unwrap_err();
        assert!(matches!(error, KnobError::UnknownOption { .. }));
        assert_eq!(knobs.get("ImageUrl").unwrap().current().as_ref(), CATS[0]);
    }

    #[test]
    fn test_select_falls_back_when_options_change() {
        let mut knobs = Knobs::new();
        knobs.select("ImageUrl", CATS, CATS[0]);
        knobs.set_selected("ImageUrl", CATS[2]).unwrap();

        let selected = knobs.select("ImageUrl", CATS[..2].iter().copied(), CATS[1]);
        assert_eq!(selected.as_ref(), CATS[1]);
    }

    #[test]
    fn test_editing_missing_or_mismatched_knobs() {
        let mut knobs = Knobs::new();
        knobs.text("Title", "Hello SiteHeader");

        assert_eq!(
            knobs.set_text("Nope", "x"),
            Err(KnobError::Missing("Nope".into()))
        );
        assert_eq!(
            knobs.set_selected("Title", "x"),
            Err(KnobError::WrongKind {
                label: "Title".into(),
                expected: "select",
            })
        );
        assert!(knobs.reset("Nope").is_err());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut knobs = Knobs::new();
        knobs.text("Name", "Billy Boy");
        knobs.select("ImageUrl", CATS, CATS[0]);
        knobs.set_text("Name", "Sally").unwrap();
        knobs.set_selected("ImageUrl", CATS[1]).unwrap();

        knobs.reset("Name").unwrap();
        assert_eq!(knobs.get("Name").unwrap().current().as_ref(), "Billy Boy");
        assert_eq!(knobs.get("ImageUrl").unwrap().current().as_ref(), CATS[1]);

        knobs.reset_all();
        assert_eq!(knobs.get("ImageUrl").unwrap().current().as_ref(), CATS[0]);
    }

    #[test]
    fn test_knobs_keep_registration_order() {
        let mut knobs = Knobs::new();
        knobs.select("ImageUrl", CATS, CATS[0]);
        knobs.text("Name", "Billy Boy");
        knobs.text("Description", "");

        let labels: Vec<&str> = knobs.iter().map(|(label, _)| label.as_ref()).collect();
        assert_eq!(labels, ["ImageUrl", "Name", "Description"]);
    }

    #[test]
    fn test_changing_kind_replaces_knob() {
        let mut knobs = Knobs::new();
        knobs.text("Theme", "default");

        let selected = knobs.select("Theme", ["default", "outline"], "outline");
        assert_eq!(selected.as_ref(), "outline");
        assert!(matches!(knobs.get("Theme"), Some(KnobValue::Select { .. })));
    }
}
