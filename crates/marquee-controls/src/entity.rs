/// Controllers that bind a properties payload before they are used.
///
/// Properties arrive from the host as deserialized data; a controller
/// holds them for its delegate and re-binding replaces the previous
/// payload wholesale.
pub trait HasProperties {
    type Properties;

    /// The bound payload, if one has been set.
    fn properties(&self) -> Option<&Self::Properties>;

    /// Binds a payload and notifies the delegate that it may be read.
    fn set_properties(&mut self, properties: Self::Properties);
}
