pub struct Constants;

impl Constants {
    pub const REPOSITORY_FOLDER_NAME: &str = ".git";
    pub const OBJECTS_FOLDER_NAME: &str = "objects";
    pub const BRANCHES_FOLDER_NAME: &str = "branches";
    pub const REFS_FOLDER_NAME: &str = "refs";
    pub const HEADS_FOLDER_NAME: &str = "heads";
    pub const TAGS_FOLDER_NAME: &str = "tags";
    pub const HEAD_FILE_NAME: &str = "HEAD";
    pub const DESCRIPTION_FILE_NAME: &str = "description";
    pub const CONFIG_FILE_NAME: &str = "config";
    pub const REF_CONTENT_HEADER: &str = "ref:";
    pub const PARENT_HEADER: &str = "parent";
    pub const TREE_HEADER: &str = "tree";

    pub const DEFAULT_DESCRIPTION: &str = "Unnamed repository.\n";
    pub const DEFAULT_HEAD: &str = "ref: refs/heads/master\n";
    pub const DEFAULT_CONFIG: &str =
        "[core]\nrepositoryformatversion = 0\nfilemode = false\nbare = false\n";

    /// Only repository format understood by this store.
    pub const REPOSITORY_FORMAT_VERSION: u32 = 0;

    /// How many `ref:` redirections are followed before giving up.
    pub const MAX_REF_DEPTH: usize = 10;
    /// How many nested trees a checkout will descend into.
    pub const MAX_TREE_DEPTH: usize = 256;
}
