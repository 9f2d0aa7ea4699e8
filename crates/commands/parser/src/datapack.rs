use std::path::Path;


/// The name of the directory of a world which holds its data packs.
pub const DATAPACKS_DIRECTORY: &str = "datapacks";

/// The root of the data pack containing `file`: the ancestor directly inside a
/// `datapacks` directory, such as `world/datapacks/my_pack` for
/// `world/datapacks/my_pack/data/ns/functions/tick.mcfunction`.
pub fn datapack_root(file: &Path) -> Option<&Path> {
    file.ancestors()
        .skip(1)
        .find(|ancestor| {
            ancestor
                .parent()
                .and_then(Path::file_name)
                .is_some_and(|name| name == DATAPACKS_DIRECTORY)
        })
}
