//! Built-in `.gitignore` templates.

/// Ignore file name
pub const IGNORE_FILE: &str = ".gitignore";

/// Template for components: build output stays tracked so it can be published
pub const COMPONENT_IGNORE: &str = "\
.DS_Store
node_modules
# local env files
.env.local
.env.*.local
# Log files
npm-debug.log*
yarn-debug.log*
yarn-error.log*
pnpm-debug.log*
package-lock.json
# Editor directories and files
.idea
.vscode
*.suo
*.ntvs*
*.njsproj
*.sln
*.sw?
";

/// Template for deployable projects
pub const PROJECT_IGNORE: &str = "\
.DS_Store
node_modules
/dist
# local env files
.env.local
.env.*.local
# Log files
npm-debug.log*
yarn-debug.log*
yarn-error.log*
pnpm-debug.log*
package-lock.json
# Editor directories and files
.idea
.vscode
*.suo
*.ntvs*
*.njsproj
*.sln
*.sw?
";

/// Template for a project kind
pub fn template(is_component: bool) -> &'static str {
    if is_component {
        COMPONENT_IGNORE
    } else {
        PROJECT_IGNORE
    }
}
