//! Derived accessors.
//!
//! Instead of generating methods at runtime, each declared attribute gets an
//! [`Accessors`] table built once from its configuration: the label-text
//! accessor, the boolean predicates (when methods are enabled) and the
//! generated scopes. Hosts look entries up by name.

use super::filter::Scope;
use super::label::LabelContext;
use super::spec::SymbolAttribute;
use crate::host::AttributeHost;
use crate::value::Symbol;
use std::sync::Arc;

/// `<attribute>_text`: the label of the current value.
#[derive(Debug, Clone)]
pub struct TextAccessor {
    attribute: Arc<SymbolAttribute>,
}

impl TextAccessor {
    pub fn name(&self) -> String {
        format!("{}_text", self.attribute.name())
    }

    pub fn get(&self, record: &dyn AttributeHost, ctx: &LabelContext<'_>) -> Option<String> {
        self.attribute
            .text(self.attribute.read(record).as_ref(), ctx)
    }
}

/// "Is the current value of `attribute` equal to `value`?"
#[derive(Debug, Clone)]
pub struct Predicate {
    pub name: String,
    pub value: Symbol,
    attribute: Arc<SymbolAttribute>,
}

impl Predicate {
    pub fn attribute(&self) -> &str {
        self.attribute.name()
    }

    pub fn test(&self, record: &dyn AttributeHost) -> bool {
        self.attribute.read(record).as_ref() == Some(&self.value)
    }
}

/// Everything derived from one attribute declaration.
#[derive(Debug, Clone)]
pub struct Accessors {
    pub text: TextAccessor,
    pub predicates: Vec<Predicate>,
    pub scopes: Vec<Scope>,
}

impl Accessors {
    pub fn build(attribute: &Arc<SymbolAttribute>) -> Self {
        let predicates = if attribute.has_methods() {
            attribute
                .allowed()
                .into_iter()
                .flat_map(|set| set.values())
                .map(|value| Predicate {
                    name: predicate_name(attribute, value),
                    value: value.clone(),
                    attribute: Arc::clone(attribute),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            text: TextAccessor {
                attribute: Arc::clone(attribute),
            },
            predicates,
            scopes: attribute.scopes(),
        }
    }

    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.iter().find(|s| s.name == name)
    }
}

fn predicate_name(attribute: &SymbolAttribute, value: &Symbol) -> String {
    match value {
        Symbol::Bool(true) => attribute.name().to_string(),
        Symbol::Bool(false) => format!("not_{}", attribute.name()),
        Symbol::Int(i) => format!("{}_{}", attribute.name(), i),
        Symbol::Name(_) => value.ident(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Declaration, SymbolOptions};
    use crate::value::Scalar;

    struct One(Option<Scalar>);

    impl AttributeHost for One {
        fn read_raw(&self, _attribute: &str) -> Option<Scalar> {
            self.0.clone()
        }

        fn write_raw(&mut self, _attribute: &str, value: Option<Scalar>) {
            self.0 = value;
        }
    }

    fn accessors(name: &str, options: SymbolOptions) -> Accessors {
        let attr = SymbolAttribute::declare("User", "symbolizes.user", name, options).unwrap();
        Accessors::build(&Arc::new(attr))
    }

    #[test]
    fn predicates_per_value() {
        let karma = accessors(
            "karma",
            SymbolOptions::new()
                .within(Declaration::values(["good", "bad", "ugly"]))
                .methods()
                .allow_nil(),
        );
        let names: Vec<&str> = karma.predicates.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["good", "bad", "ugly"]);

        let record = One(Some(Scalar::from("ugly")));
        assert!(karma.predicate("ugly").unwrap().test(&record));
        assert!(!karma.predicate("good").unwrap().test(&record));
        assert!(!karma.predicate("good").unwrap().test(&One(None)));
    }

    #[test]
    fn boolean_and_integer_predicate_names() {
        let sex = accessors(
            "sex",
            SymbolOptions::new()
                .within(Declaration::values([true, false]))
                .methods(),
        );
        assert!(sex.predicate("sex").is_some());
        assert!(sex.predicate("not_sex").is_some());

        let lvl = accessors(
            "lvl",
            SymbolOptions::new()
                .within(Declaration::range(1..=2))
                .methods(),
        );
        assert!(lvl.predicate("lvl_2").unwrap().test(&One(Some(Scalar::Int(2)))));
    }

    #[test]
    fn no_predicates_without_methods() {
        let gui = accessors("gui", SymbolOptions::new().within(Declaration::values(["qt"])));
        assert!(gui.predicates.is_empty());
    }

    #[test]
    fn text_accessor_reads_current_value() {
        let status = accessors(
            "status",
            SymbolOptions::new()
                .within(Declaration::values(["active", "inactive"]))
                .i18n(false)
                .capitalize(),
        );
        assert_eq!(status.text.name(), "status_text");
        let ctx = LabelContext::plain();
        assert_eq!(
            status.text.get(&One(Some(Scalar::from("inactive"))), &ctx),
            Some("Inactive".to_string())
        );
        assert_eq!(status.text.get(&One(None), &ctx), None);
    }
}
