// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ export
//!
//! Coordinates are written as-is (z up). Faces keep their polygon form and
//! are grouped under `# Roof`, `# Walls` and `# Base` comments.

use crate::error::Result;
use crate::mesh::{Face, FaceGroup, Mesh};
use std::io::Write;

fn group_comment(group: FaceGroup) -> &'static str {
    match group {
        FaceGroup::Roof => "# Roof",
        FaceGroup::Wall => "# Walls",
        FaceGroup::Bottom => "# Base",
    }
}

/// Write `mesh` as OBJ text
pub fn write_obj<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    writeln!(writer, "# roofmesh OBJ export")?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    )?;
    writeln!(writer)?;

    for v in &mesh.verts {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }

    for group in [FaceGroup::Roof, FaceGroup::Wall, FaceGroup::Bottom] {
        writeln!(writer)?;
        writeln!(writer, "{}", group_comment(group))?;
        write_faces(&mut writer, mesh.faces(group))?;
    }

    writer.flush()?;
    Ok(())
}

fn write_faces<W: Write>(writer: &mut W, faces: &[Face]) -> Result<()> {
    for face in faces.iter().filter(|f| f.len() >= 3) {
        write!(writer, "f")?;
        for &index in face {
            // OBJ indices are 1-based
            write!(writer, " {}", index + 1)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// OBJ text of `mesh`
pub fn to_obj_string(mesh: &Mesh) -> Result<String> {
    let mut buffer = Vec::new();
    write_obj(mesh, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point3;
    use smallvec::smallvec;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 2.5));
        mesh.add_face(FaceGroup::Roof, smallvec![0, 1, 2]);
        mesh.add_face(FaceGroup::Bottom, smallvec![2, 1, 0]);
        mesh
    }

    #[test]
    fn test_obj_layout() {
        let obj = to_obj_string(&triangle_mesh()).unwrap();
        let lines: Vec<&str> = obj.lines().collect();

        assert!(lines[0].starts_with('#'));
        assert!(lines.contains(&"v 0 1 2.5"));

        let roof = lines.iter().position(|l| *l == "# Roof").unwrap();
        let walls = lines.iter().position(|l| *l == "# Walls").unwrap();
        let base = lines.iter().position(|l| *l == "# Base").unwrap();
        assert!(roof < walls && walls < base);
        assert_eq!(lines[roof + 1], "f 1 2 3");
        assert_eq!(lines[base + 1], "f 3 2 1");
    }

    #[test]
    fn test_degenerate_faces_are_skipped() {
        let mut mesh = triangle_mesh();
        mesh.add_face(FaceGroup::Wall, smallvec![0, 1]);
        let obj = to_obj_string(&mesh).unwrap();
        assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 2);
    }

    #[test]
    fn test_counts_in_header() {
        let obj = to_obj_string(&triangle_mesh()).unwrap();
        assert!(obj.lines().nth(1).unwrap().contains("3 vertices, 2 faces"));
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 3);
    }
}
