//! Fixed project files written next to the exported pages.
//!
//! Their content depends on the project's name and description only, never
//! on page content.

use serde_json::json;
use sf_model::Project;

/// Package name derived from a project name: lowercased, whitespace runs
/// replaced by `-`.
pub fn package_name(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// `package.json` dependency manifest.
pub fn package_json(project: &Project) -> String {
    let manifest = json!({
        "name": package_name(&project.name),
        "version": "1.0.0",
        "description": project.description,
        "main": "index.js",
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0"
        },
        "devDependencies": {
            "@types/react": "^18.2.0",
            "@types/react-dom": "^18.2.0",
            "@vitejs/plugin-react": "^4.0.0",
            "typescript": "^5.0.0",
            "vite": "^4.4.0"
        }
    });
    format!("{manifest:#}")
}

/// `vite.config.ts` build configuration.
pub const VITE_CONFIG: &str = "import { defineConfig } from 'vite'
import react from '@vitejs/plugin-react'

export default defineConfig({
  plugins: [react()],
})
";

/// `tsconfig.json` compiler settings.
pub fn tsconfig_json() -> String {
    let config = json!({
        "compilerOptions": {
            "target": "ES2020",
            "useDefineForClassFields": true,
            "lib": ["ES2020", "DOM", "DOM.Iterable"],
            "module": "ESNext",
            "skipLibCheck": true,
            "moduleResolution": "bundler",
            "allowImportingTsExtensions": true,
            "resolveJsonModule": true,
            "isolatedModules": true,
            "noEmit": true,
            "jsx": "react-jsx",
            "strict": true,
            "noUnusedLocals": true,
            "noUnusedParameters": true,
            "noFallthroughCasesInSwitch": true
        },
        "include": ["src"]
    });
    format!("{config:#}")
}

/// `README.md` with setup instructions.
pub fn readme(project: &Project) -> String {
    format!(
        "# {name}

{description}

## Generated by SiteForge

This project was generated by SiteForge and is ready for development.

## Getting Started

```bash
npm install
npm run dev
```

## Build

```bash
npm run build
```
",
        name = project.name,
        description = project.description,
    )
}

/// All scaffold files as `(path, content)` pairs.
pub fn files(project: &Project) -> [(&'static str, String); 4] {
    [
        ("package.json", package_json(project)),
        ("vite.config.ts", VITE_CONFIG.to_owned()),
        ("tsconfig.json", tsconfig_json()),
        ("README.md", readme(project)),
    ]
}
