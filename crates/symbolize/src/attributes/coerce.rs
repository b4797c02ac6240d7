//! The coercion engine.
//!
//! Reads go raw → canonical through [`SymbolAttribute::decode`], writes go
//! assigned → storage through [`SymbolAttribute::encode`]. Both share the
//! same blank policy and the same matching rule, so for every allowed value
//! `decode(encode(v)) == canonicalize(v)`.
//!
//! Coercion is lenient: a value outside the allowed set is passed through in
//! its best-effort canonical form and left for validation to report.

use super::spec::SymbolAttribute;
use crate::host::AttributeHost;
use crate::value::{Scalar, Symbol};

impl SymbolAttribute {
    /// Canonical form of a non-blank value: the matching allowed member if
    /// there is one, otherwise the value itself.
    pub fn canonicalize(&self, value: &Scalar) -> Symbol {
        match &self.allowed {
            Some(set) => match set.find(value) {
                Some(member) => member.clone(),
                None => {
                    tracing::trace!(
                        model = %self.model,
                        attribute = %self.name,
                        value = %value,
                        "value outside allowed set"
                    );
                    value.canonicalize()
                }
            },
            None => value.canonicalize(),
        }
    }

    /// Raw stored value → canonical value. Nil and blank read as `None`,
    /// whatever `allow_blank` says.
    pub fn decode(&self, raw: Option<&Scalar>) -> Option<Symbol> {
        let raw = raw?;
        if raw.is_blank() {
            return None;
        }
        Some(self.canonicalize(raw))
    }

    /// Assigned value → storage representation. Nil and blank become `None`.
    pub fn encode(&self, assigned: Option<&Scalar>) -> Option<Scalar> {
        self.decode(assigned).map(|symbol| symbol.storage())
    }

    /// Symbolic read through a host record.
    pub fn read(&self, host: &dyn AttributeHost) -> Option<Symbol> {
        self.decode(host.read_raw(&self.name).as_ref())
    }

    /// Symbolic write through a host record. Returns the canonical value now
    /// held by the attribute.
    ///
    /// The raw setter is skipped when the canonical value is unchanged, so
    /// re-assigning an equal value in another representation never marks the
    /// attribute dirty.
    pub fn write(&self, host: &mut dyn AttributeHost, assigned: Option<&Scalar>) -> Option<Symbol> {
        let next = self.decode(assigned);
        if self.read(host) == next {
            return next;
        }
        host.write_raw(&self.name, next.as_ref().map(Symbol::storage));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Declaration, SymbolOptions};
    use std::collections::HashMap;

    fn attr(options: SymbolOptions) -> SymbolAttribute {
        SymbolAttribute::declare("User", "symbolizes.user", "status", options).unwrap()
    }

    fn status() -> SymbolAttribute {
        attr(
            SymbolOptions::new()
                .within(Declaration::values(["active", "inactive"]))
                .capitalize(),
        )
    }

    #[derive(Default)]
    struct Raw {
        values: HashMap<String, Scalar>,
        writes: usize,
    }

    impl AttributeHost for Raw {
        fn read_raw(&self, attribute: &str) -> Option<Scalar> {
            self.values.get(attribute).cloned()
        }

        fn write_raw(&mut self, attribute: &str, value: Option<Scalar>) {
            self.writes += 1;
            match value {
                Some(v) => self.values.insert(attribute.to_string(), v),
                None => self.values.remove(attribute),
            };
        }
    }

    #[test]
    fn decode_nil_and_blank() {
        let status = status();
        assert_eq!(status.decode(None), None);
        assert_eq!(status.decode(Some(&Scalar::from(""))), None);
        assert_eq!(status.decode(Some(&Scalar::from("  "))), None);

        let blank_ok = attr(
            SymbolOptions::new()
                .within(Declaration::values(["active"]))
                .allow_blank(),
        );
        assert_eq!(blank_ok.decode(Some(&Scalar::from(""))), None);
    }

    #[test]
    fn decode_matches_string_and_symbol() {
        let status = status();
        assert_eq!(
            status.decode(Some(&Scalar::from("inactive"))),
            Some(Symbol::name("inactive"))
        );
        assert_eq!(
            status.decode(Some(&Scalar::sym("active"))),
            Some(Symbol::name("active"))
        );
    }

    #[test]
    fn unknown_values_pass_through() {
        let status = status();
        assert_eq!(status.decode(Some(&Scalar::from("43"))), Some(Symbol::name("43")));
        assert_eq!(status.decode(Some(&Scalar::Int(43))), Some(Symbol::Int(43)));
    }

    #[test]
    fn encode_uses_storage_form() {
        let status = status();
        assert_eq!(
            status.encode(Some(&Scalar::sym("inactive"))),
            Some(Scalar::from("inactive"))
        );
        assert_eq!(status.encode(Some(&Scalar::from(""))), None);
        assert_eq!(status.encode(None), None);

        let lvl = attr(SymbolOptions::new().within(Declaration::range(1..=9)));
        assert_eq!(lvl.encode(Some(&Scalar::from("9"))), Some(Scalar::Int(9)));

        let sex = attr(SymbolOptions::new().within(Declaration::values([true, false])));
        assert_eq!(sex.encode(Some(&Scalar::from("true"))), Some(Scalar::Bool(true)));
    }

    #[test]
    fn string_and_symbol_encode_identically() {
        let status = status();
        let from_string = status.encode(Some(&Scalar::from("inactive")));
        let from_symbol = status.encode(Some(&Scalar::sym("inactive")));
        let from_canonical = status.encode(Some(&Symbol::name("inactive").into()));
        assert_eq!(from_string, from_symbol);
        assert_eq!(from_symbol, from_canonical);
    }

    #[test]
    fn round_trip_for_every_allowed_value() {
        let declarations = vec![
            Declaration::values(["active", "inactive"]),
            Declaration::values([true, false]),
            Declaration::range(1..=9),
            Declaration::labeled([("linux", "Linux"), ("mac", "Mac OS X")]),
        ];
        for declaration in declarations {
            let attr = attr(SymbolOptions::new().within(declaration));
            for member in attr.allowed().unwrap().values() {
                let raw: Scalar = member.clone().into();
                let stored = attr.encode(Some(&raw));
                assert_eq!(attr.decode(stored.as_ref()), Some(attr.canonicalize(&raw)));
                assert_eq!(attr.decode(stored.as_ref()).as_ref(), Some(member));
            }
        }
    }

    #[test]
    fn write_skips_equal_canonical_values() {
        let language = attr(SymbolOptions::new().within(Declaration::values(["pt", "en"])));
        let mut host = Raw::default();
        host.values.insert("status".into(), Scalar::from("pt"));

        assert_eq!(
            language.write(&mut host, Some(&Scalar::sym("pt"))),
            Some(Symbol::name("pt"))
        );
        assert_eq!(host.writes, 0);

        assert_eq!(
            language.write(&mut host, Some(&Scalar::sym("en"))),
            Some(Symbol::name("en"))
        );
        assert_eq!(host.writes, 1);
        assert_eq!(host.read_raw("status"), Some(Scalar::from("en")));
    }

    #[test]
    fn write_blank_clears_storage() {
        let status = status();
        let mut host = Raw::default();
        host.values.insert("status".into(), Scalar::from("active"));

        assert_eq!(status.write(&mut host, Some(&Scalar::from(""))), None);
        assert_eq!(host.read_raw("status"), None);
        assert_eq!(status.read(&host), None);
    }
}
