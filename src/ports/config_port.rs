//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// True when the key is present, even if its value does not parse.
    fn has_key(&self, section: &str, key: &str) -> bool {
        self.get_string(section, key).is_some()
    }
}
