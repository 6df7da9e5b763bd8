//! Minimal FastAPI project written when the model returns no files

use super::types::FileEntry;

const MAIN_PY: &str = r#"from fastapi import FastAPI
from pydantic import BaseModel
app = FastAPI()

class Task(BaseModel):
    id: int
    title: str
    done: bool = False

DB = {}
@app.get("/health")
def health(): return {"ok": True}
@app.post("/tasks")
def create_task(t: Task): DB[t.id] = t.model_dump(); return DB[t.id]
@app.get("/tasks")
def list_tasks(): return list(DB.values())
"#;

const REQUIREMENTS_TXT: &str = "fastapi\nuvicorn[standard]\nSQLAlchemy\npsycopg2-binary\n";

const DOCKERFILE: &str = r#"FROM python:3.11-slim
WORKDIR /app
COPY requirements.txt .
RUN pip install -r requirements.txt
COPY . .
EXPOSE 8000
CMD ["uvicorn", "app.main:app", "--host", "0.0.0.0", "--port", "8000"]
"#;

const README_MD: &str = "# FastAPI Task Manager\n\nRun locally: uvicorn app.main:app --reload\n";

fn render_yaml(service_name: &str) -> String {
    format!(
        "services:\n  - type: web\n    name: {}\n    env: python\n    plan: free\n    buildCommand: pip install -r requirements.txt\n    startCommand: uvicorn app.main:app --host 0.0.0.0 --port 8000\n",
        service_name
    )
}

/// The fixed fallback file set; `service_name` names the web service in `render.yaml`
pub fn minimal_scaffold(service_name: &str) -> Vec<FileEntry> {
    vec![
        FileEntry::new("app/main.py", MAIN_PY),
        FileEntry::new("requirements.txt", REQUIREMENTS_TXT),
        FileEntry::new("Dockerfile", DOCKERFILE),
        FileEntry::new("render.yaml", render_yaml(service_name)),
        FileEntry::new("README.md", README_MD),
    ]
}
