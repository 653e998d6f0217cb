//! Pull-based data binding for the virtualized list plugin. The list
//! widget never materializes more cells than fit its viewport; it asks
//! the controller for count, per-cell size, and cell instances on
//! demand, recycling widget slots as rows scroll out.

/// Sizing contract for one cell's properties.
pub trait CellProperties {
    /// Size of this cell along the scroll axis, in host units.
    fn cell_size(&self) -> f32;
}

/// Behaviour hooks for a scroller controller.
pub trait ScrollerDelegate {
    type CellProperties: CellProperties;
    type Cell;

    /// Builds or rebinds the cell shown at `data_index`, reusing the
    /// recycled widget slot `cell_index`.
    fn create_cell(
        &mut self,
        properties: &Self::CellProperties,
        data_index: usize,
        cell_index: usize,
    ) -> Self::Cell;

    /// The data set was replaced and the list should reload.
    fn data_reloaded(&mut self) {}
}

/// Binds a cell data set to a behaviour delegate.
pub struct ScrollerController<D: ScrollerDelegate> {
    delegate: D,
    data: Vec<D::CellProperties>,
}

impl<D: ScrollerDelegate> ScrollerController<D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            data: Vec::new(),
        }
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn data(&self) -> &[D::CellProperties] {
        &self.data
    }

    /// Replaces the data set and tells the delegate to reload.
    pub fn set_data(&mut self, data: Vec<D::CellProperties>) {
        self.data = data;
        self.delegate.data_reloaded();
    }

    /// Number of cells the list should present.
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Size of the cell at `data_index`, or `None` out of range.
    pub fn cell_size(&self, data_index: usize) -> Option<f32> {
        self.data.get(data_index).map(CellProperties::cell_size)
    }

    /// Builds the cell for `data_index` in widget slot `cell_index`,
    /// or `None` out of range.
    pub fn cell(&mut self, data_index: usize, cell_index: usize) -> Option<D::Cell> {
        let properties = self.data.get(data_index)?;
        Some(self.delegate.create_cell(properties, data_index, cell_index))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct RowProperties {
        label: String,
        height: f32,
    }

    impl CellProperties for RowProperties {
        fn cell_size(&self) -> f32 {
            self.height
        }
    }

    #[derive(Default)]
    struct RowFactory {
        reloads: usize,
    }

    impl ScrollerDelegate for RowFactory {
        type CellProperties = RowProperties;
        type Cell = String;

        fn create_cell(
            &mut self,
            properties: &RowProperties,
            data_index: usize,
            cell_index: usize,
        ) -> String {
            format!("{}@{data_index}/slot{cell_index}", properties.label)
        }

        fn data_reloaded(&mut self) {
            self.reloads += 1;
        }
    }

    fn rows() -> Vec<RowProperties> {
        ["alpha", "beta", "gamma"]
            .into_iter()
            .enumerate()
            .map(|(index, label)| RowProperties {
                label: label.to_string(),
                height: 20.0 + index as f32,
            })
            .collect()
    }

    #[test]
    fn replacing_the_data_reloads_the_list() {
        let mut scroller = ScrollerController::new(RowFactory::default());
        assert_eq!(scroller.cell_count(), 0);

        scroller.set_data(rows());

        assert_eq!(scroller.cell_count(), 3);
        assert_eq!(scroller.delegate().reloads, 1);
    }

    #[test]
    fn cells_are_built_from_their_properties() {
        let mut scroller = ScrollerController::new(RowFactory::default());
        scroller.set_data(rows());

        assert_eq!(scroller.cell(1, 0), Some("beta@1/slot0".to_string()));
        assert_eq!(scroller.cell_size(2), Some(22.0));
    }

    #[test]
    fn out_of_range_lookups_return_none() {
        let mut scroller = ScrollerController::new(RowFactory::default());
        scroller.set_data(rows());

        assert_eq!(scroller.cell(3, 0), None);
        assert_eq!(scroller.cell_size(3), None);
        assert_eq!(scroller.delegate().reloads, 1);
    }
}
