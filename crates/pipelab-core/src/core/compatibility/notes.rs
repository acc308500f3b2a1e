use crate::core::catalog::descriptor::ModuleDescriptor;
use phf::{Map, phf_map};

/// Curated explanations keyed by `"<from>-><to>"`.
static CURATED_NOTES: Map<&'static str, &'static str> = phf_map! {
    "rfdiffusion->proteinmpnn" => "RFdiffusion produces backbone-only scaffolds. ProteinMPNN designs the sequences that should fold onto them, turning a shape into something you can order.",
    "proteinmpnn->esmfold" => "Refolding designed sequences with ESMFold is the standard self-consistency check: a design is only convincing if the predicted structure matches the intended backbone.",
    "proteinmpnn->alphafold2" => "AlphaFold2 refolding gives a stricter self-consistency check than single-sequence methods, at the cost of building an MSA for every design.",
    "esmfold->structure-qc" => "ESMFold reports pLDDT in the B-factor column. The quality check reads it to flag low-confidence regions before you build on the model.",
    "alphafold2->structure-qc" => "PAE is what tells you whether domains are placed correctly relative to each other; pLDDT alone only speaks to local accuracy.",
    "mmseqs2->alphafold2" => "AlphaFold2 draws most of its accuracy from coevolution in the MSA. Shallow alignments are the most common cause of poor predictions.",
    "mmseqs2->iqtree" => "The tree is only as good as the alignment. Trim gappy columns before inference or long-branch artefacts will dominate.",
    "anarci->igfold" => "Numbering first makes CDR boundaries explicit, so you can see which loops IgFold is least certain about.",
    "esmfold->diffdock" => "Docking into a predicted structure assumes the pocket is modelled well. Check pLDDT around the binding site before trusting poses.",
    "diffdock->autodock-vina" => "DiffDock finds plausible poses blindly; rescoring them with Vina adds a physics-inspired view of the same contacts.",
    "esmfold->foldx" => "FoldX expects a well-packed structure. Run RepairPDB on predicted models first or ddG values will be dominated by clashes.",
    "igfold->proteinmpnn" => "Fixing framework positions and redesigning only CDR residues keeps the antibody scaffold intact while exploring binding loops.",
};

pub fn curated_note(from_id: &str, to_id: &str) -> Option<&'static str> {
    CURATED_NOTES.get(format!("{from_id}->{to_id}").as_str()).copied()
}

pub fn generic_note(from: &ModuleDescriptor, to: &ModuleDescriptor) -> String {
    let shared = from.shared_formats(to);
    if shared.is_empty() {
        format!(
            "{} emits {} while {} needs {}. Connecting them would require an intermediate conversion step.",
            from.name,
            from.outputs.join(", "),
            to.name,
            to.inputs.join(", ")
        )
    } else {
        format!(
            "{} emits {}; {} accepts {}. Data flows between them as {}.",
            from.name,
            from.outputs.join(", "),
            to.name,
            to.inputs.join(", "),
            shared.join(", ")
        )
    }
}

/// Curated note when one exists for the ordered pair, otherwise a generic note.
pub fn learning_note(from: &ModuleDescriptor, to: &ModuleDescriptor) -> String {
    curated_note(&from.id, &to.id)
        .map(str::to_string)
        .unwrap_or_else(|| generic_note(from, to))
}
