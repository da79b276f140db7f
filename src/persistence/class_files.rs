use crate::classifiers::bayes::{ClassData, NaiveBayes};
use crate::classifiers::{Class, ClassifierError};
use crate::persistence::json_error;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn class_path(dir: &Path, class: &Class) -> PathBuf {
    dir.join(class.as_str())
}

impl NaiveBayes {
    /// Writes the statistics of `class` to `dir/<class>`.
    pub fn write_class_to_file(
        &self,
        class: &Class,
        dir: impl AsRef<Path>,
    ) -> Result<(), ClassifierError> {
        let data = self.class_data(class)?;
        let path = class_path(dir.as_ref(), class);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &data).map_err(json_error)?;
        writer.flush()?;
        debug!("wrote class '{class}' to {}", path.display());
        Ok(())
    }

    /// Writes every class to its own file inside `dir`.
    pub fn write_classes_to_file(&self, dir: impl AsRef<Path>) -> Result<(), ClassifierError> {
        let dir = dir.as_ref();
        for class in self.classes() {
            self.write_class_to_file(&class, dir)?;
        }
        Ok(())
    }

    /// Replaces the statistics of `class` with the ones stored in
    /// `dir/<class>`.
    ///
    /// A class file does not record how many documents produced it, so the
    /// learned counter grows by exactly one per read.
    pub fn read_class_from_file(
        &self,
        class: &Class,
        dir: impl AsRef<Path>,
    ) -> Result<(), ClassifierError> {
        let path = class_path(dir.as_ref(), class);
        let reader = BufReader::new(File::open(&path)?);
        let data: ClassData = serde_json::from_reader(reader).map_err(json_error)?;
        self.replace_class_data(class, data)?;
        debug!("read class '{class}' from {}", path.display());
        Ok(())
    }
}
